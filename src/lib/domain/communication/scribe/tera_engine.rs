//! Tera templates

use tera::{Context, Tera};

use super::{errors::describe, ScribeError, TemplateContext, TemplatePart};

/// A single compiled template. Only the HTML body gets an `.html` name, so
/// autoescaping applies to it alone.
#[derive(Debug)]
struct Compiled {
    name: &'static str,
    tera: Tera,
}

/// Compiled Tera templates for one message
#[derive(Debug, Default)]
pub(super) struct TeraTemplates {
    subject: Option<Compiled>,
    text: Option<Compiled>,
    html: Option<Compiled>,
}

impl TeraTemplates {
    pub(super) fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, part: TemplatePart) -> &mut Option<Compiled> {
        match part {
            TemplatePart::Subject => &mut self.subject,
            TemplatePart::Text => &mut self.text,
            TemplatePart::Html => &mut self.html,
        }
    }

    fn compiled(&self, part: TemplatePart) -> Option<&Compiled> {
        match part {
            TemplatePart::Subject => self.subject.as_ref(),
            TemplatePart::Text => self.text.as_ref(),
            TemplatePart::Html => self.html.as_ref(),
        }
    }

    /// Replaces the template for `part`. A template that fails to compile is
    /// dropped.
    pub(super) fn compile(&mut self, part: TemplatePart, source: &str) -> Result<(), ScribeError> {
        let name = match part {
            TemplatePart::Html => "html.html",
            TemplatePart::Subject | TemplatePart::Text => part.name(),
        };

        let slot = self.slot(part);
        *slot = None;

        let mut tera = Tera::default();
        tera.add_raw_template(name, source)
            .map_err(|err| ScribeError::Compile {
                part,
                reason: describe(&err),
            })?;

        *slot = Some(Compiled { name, tera });

        Ok(())
    }

    /// Renders `part`, or an empty string when it has no template.
    pub(super) fn render(
        &self,
        part: TemplatePart,
        context: &TemplateContext,
    ) -> Result<String, ScribeError> {
        let Some(compiled) = self.compiled(part) else {
            return Ok(String::new());
        };

        let render_error = |err: tera::Error| ScribeError::Render {
            part,
            reason: describe(&err),
        };

        let context = Context::from_serialize(context).map_err(render_error)?;

        compiled
            .tera
            .render(compiled.name, &context)
            .map_err(render_error)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn context() -> TemplateContext {
        [("subject", "R&D")].into_iter().collect()
    }

    #[test]
    fn test_render_subject_without_escaping() -> TestResult {
        let mut templates = TeraTemplates::new();
        templates.compile(TemplatePart::Subject, "Subject Is {{ subject }}")?;

        assert_eq!(
            templates.render(TemplatePart::Subject, &context())?,
            "Subject Is R&D"
        );

        Ok(())
    }

    #[test]
    fn test_render_html_escapes_values() -> TestResult {
        let mut templates = TeraTemplates::new();
        templates.compile(TemplatePart::Html, "<p>{{ subject }}</p>")?;

        assert_eq!(
            templates.render(TemplatePart::Html, &context())?,
            "<p>R&amp;D</p>"
        );

        Ok(())
    }

    #[test]
    fn test_expressions() -> TestResult {
        let mut templates = TeraTemplates::new();
        templates.compile(
            TemplatePart::Text,
            "{% if subject %}{{ subject | lower }}{% else %}none{% endif %}",
        )?;

        assert_eq!(templates.render(TemplatePart::Text, &context())?, "r&d");

        Ok(())
    }

    #[test]
    fn test_missing_variable_is_a_render_error() -> TestResult {
        let mut templates = TeraTemplates::new();
        templates.compile(TemplatePart::Text, "Hello {{ name }}")?;

        let result = templates.render(TemplatePart::Text, &context());

        assert!(matches!(
            result,
            Err(ScribeError::Render {
                part: TemplatePart::Text,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn test_compile_error_drops_previous_template() -> TestResult {
        let mut templates = TeraTemplates::new();
        templates.compile(TemplatePart::Subject, "fine")?;

        assert!(templates
            .compile(TemplatePart::Subject, "{% if %}")
            .is_err());
        assert_eq!(templates.render(TemplatePart::Subject, &context())?, "");

        Ok(())
    }
}
