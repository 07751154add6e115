use super::{Rendered, TemplatePart};

/// Literal subject and bodies, copied into the message unchanged.
#[derive(Debug, Default)]
pub(super) struct StaticText {
    subject: String,
    text: String,
    html: String,
}

impl StaticText {
    pub(super) fn set(&mut self, part: TemplatePart, source: &str) {
        let slot = match part {
            TemplatePart::Subject => &mut self.subject,
            TemplatePart::Text => &mut self.text,
            TemplatePart::Html => &mut self.html,
        };

        *slot = source.to_string();
    }

    pub(super) fn get(&self, part: TemplatePart) -> &str {
        match part {
            TemplatePart::Subject => &self.subject,
            TemplatePart::Text => &self.text,
            TemplatePart::Html => &self.html,
        }
    }

    pub(super) fn rendered(&self) -> Rendered {
        Rendered {
            subject: self.get(TemplatePart::Subject).to_string(),
            text: self.get(TemplatePart::Text).to_string(),
            html: self.get(TemplatePart::Html).to_string(),
        }
    }
}
