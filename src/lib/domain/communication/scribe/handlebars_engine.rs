//! Handlebars templates

use handlebars::{no_escape, Handlebars};

use super::{errors::describe, ScribeError, TemplateContext, TemplatePart};

/// Compiled Handlebars templates for one message. Subject and text are
/// rendered verbatim, the HTML body is HTML-escaped.
#[derive(Debug)]
pub(super) struct HandlebarsTemplates {
    plain: Handlebars<'static>,
    html: Handlebars<'static>,
}

impl HandlebarsTemplates {
    pub(super) fn new() -> Self {
        let mut plain = Handlebars::new();
        plain.register_escape_fn(no_escape);

        Self {
            plain,
            html: Handlebars::new(),
        }
    }

    fn registry(&self, part: TemplatePart) -> &Handlebars<'static> {
        match part {
            TemplatePart::Html => &self.html,
            TemplatePart::Subject | TemplatePart::Text => &self.plain,
        }
    }

    fn registry_mut(&mut self, part: TemplatePart) -> &mut Handlebars<'static> {
        match part {
            TemplatePart::Html => &mut self.html,
            TemplatePart::Subject | TemplatePart::Text => &mut self.plain,
        }
    }

    /// Replaces the template for `part`. A template that fails to compile is
    /// dropped.
    pub(super) fn compile(&mut self, part: TemplatePart, source: &str) -> Result<(), ScribeError> {
        let registry = self.registry_mut(part);
        registry.unregister_template(part.name());

        registry
            .register_template_string(part.name(), source)
            .map_err(|err| ScribeError::Compile {
                part,
                reason: describe(&err),
            })
    }

    /// Renders `part`, or an empty string when it has no template.
    pub(super) fn render(
        &self,
        part: TemplatePart,
        context: &TemplateContext,
    ) -> Result<String, ScribeError> {
        let registry = self.registry(part);

        if !registry.has_template(part.name()) {
            return Ok(String::new());
        }

        registry
            .render(part.name(), context)
            .map_err(|err| ScribeError::Render {
                part,
                reason: describe(&err),
            })
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
        let mut templates = HandlebarsTemplates::new();
        templates.compile(TemplatePart::Subject, "Subject Is {{ subject }}")?;

        assert_eq!(
            templates.render(TemplatePart::Subject, &context())?,
            "Subject Is R&D"
        );

        Ok(())
    }

    #[test]
    fn test_render_html_escapes_values() -> TestResult {
        let mut templates = HandlebarsTemplates::new();
        templates.compile(TemplatePart::Html, "<p>{{ subject }}</p>")?;

        assert_eq!(
            templates.render(TemplatePart::Html, &context())?,
            "<p>R&amp;D</p>"
        );

        Ok(())
    }

    #[test]
    fn test_missing_template_renders_empty() -> TestResult {
        let templates = HandlebarsTemplates::new();

        assert_eq!(templates.render(TemplatePart::Text, &context())?, "");

        Ok(())
    }

    #[test]
    fn test_missing_key_renders_empty() -> TestResult {
        let mut templates = HandlebarsTemplates::new();
        templates.compile(TemplatePart::Text, "Hi {{ nobody }}!")?;

        assert_eq!(templates.render(TemplatePart::Text, &context())?, "Hi !");

        Ok(())
    }

    #[test]
    fn test_compile_error_drops_previous_template() -> TestResult {
        let mut templates = HandlebarsTemplates::new();
        templates.compile(TemplatePart::Text, "fine")?;

        let result = templates.compile(TemplatePart::Text, "{{#if}}broken");

        assert!(matches!(
            result,
            Err(ScribeError::Compile {
                part: TemplatePart::Text,
                ..
            })
        ));
        assert_eq!(templates.render(TemplatePart::Text, &context())?, "");

        Ok(())
    }
}
