//! Scribe module.
//!
//! A [`Scribe`] turns subject/text/HTML templates plus a [`TemplateContext`]
//! into a [`MessageBody`]. The rendering backend is picked once, at
//! construction, from a [`TemplateType`]:
//!
//! - [`TemplateType::None`]: the templates are literal text.
//! - [`TemplateType::Handlebars`]: `{{ name }}` substitution.
//! - [`TemplateType::Tera`]: Django/Jinja style templates with filters and blocks.
//!
//! Both template backends inline `<style>` rules into the rendered HTML and
//! strip inter-tag whitespace.
//!
//! Errors are accumulated and only surface through [`Scribe::errors`] or
//! [`Scribe::message`].

mod context;
mod errors;
mod handlebars_engine;
mod html;
mod loader;
mod static_text;
mod tera_engine;

use std::{fmt, path::PathBuf};

use clap::ValueEnum;
use lettre::Message;
use tracing::debug;

use crate::domain::communication::{
    envelope::Envelope,
    message::{Attachment, MessageBody},
};

use handlebars_engine::HandlebarsTemplates;
use static_text::StaticText;
use tera_engine::TeraTemplates;

pub use context::TemplateContext;
pub use errors::{ScribeError, ScribeErrors};
pub use html::{flatten_html, inline_and_flatten};
pub use loader::load_template_string;

/// Selects how a [`Scribe`] renders its templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum TemplateType {
    /// Literal text, no substitution
    #[default]
    None,

    /// Handlebars templates
    #[value(alias = "go")]
    Handlebars,

    /// Tera templates
    #[value(alias = "pongo")]
    Tera,
}

impl TemplateType {
    /// Whether rendering needs a context.
    pub fn requires_context(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Handlebars => "handlebars",
            Self::Tera => "tera",
        };

        write!(f, "{name}")
    }
}

/// One of the three templates of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplatePart {
    /// The subject line
    Subject,

    /// The plain text body
    Text,

    /// The HTML body
    Html,
}

impl TemplatePart {
    fn name(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug)]
enum Engine {
    Static(StaticText),
    Handlebars(HandlebarsTemplates),
    Tera(TeraTemplates),
}

struct Rendered {
    subject: String,
    text: String,
    html: String,
}

/// Renders templates into a message
#[derive(Debug)]
pub struct Scribe {
    engine: Engine,
    high_priority: bool,
    attachments: Vec<Attachment>,
    message: Option<MessageBody>,
    errors: Vec<ScribeError>,
}

impl Scribe {
    /// Creates a scribe rendering with the given backend.
    pub fn new(template_type: TemplateType) -> Self {
        let engine = match template_type {
            TemplateType::None => Engine::Static(StaticText::default()),
            TemplateType::Handlebars => Engine::Handlebars(HandlebarsTemplates::new()),
            TemplateType::Tera => Engine::Tera(TeraTemplates::new()),
        };

        Self {
            engine,
            high_priority: false,
            attachments: Vec::new(),
            message: None,
            errors: Vec::new(),
        }
    }

    /// The backend this scribe renders with.
    pub fn template_type(&self) -> TemplateType {
        match self.engine {
            Engine::Static(_) => TemplateType::None,
            Engine::Handlebars(_) => TemplateType::Handlebars,
            Engine::Tera(_) => TemplateType::Tera,
        }
    }

    /// Flags the message as high priority.
    pub fn set_priority(&mut self, is_high: bool) {
        self.high_priority = is_high;
    }

    /// Sets the subject template. Compile errors are recorded immediately.
    pub fn set_subject_template(&mut self, subject: &str) {
        self.compile(TemplatePart::Subject, subject);
    }

    /// Sets the text body template. A blank template is ignored.
    pub fn set_text_body_template(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.compile(TemplatePart::Text, text);
    }

    /// Sets the HTML body template. A blank template is ignored.
    pub fn set_html_body_template(&mut self, html: &str) {
        if html.trim().is_empty() {
            return;
        }

        self.compile(TemplatePart::Html, html);
    }

    /// Sets the HTML or the text body template.
    pub fn set_body_template(&mut self, template: &str, is_html: bool) {
        if is_html {
            self.set_html_body_template(template);
        } else {
            self.set_text_body_template(template);
        }
    }

    /// Queues a file to attach, optionally under a different name.
    pub fn include(&mut self, path: impl Into<PathBuf>, name: Option<&str>) {
        self.attachments.push(Attachment::new(path, name));
    }

    /// Starts a new message.
    pub fn open(&mut self) -> Result<&mut MessageBody, ScribeError> {
        if self.message.is_some() {
            return Err(ScribeError::AlreadyOpen);
        }

        Ok(self.message.insert(MessageBody::new()))
    }

    /// Discards the current message and any recorded errors.
    pub fn close(&mut self) {
        self.message = None;
        self.errors.clear();
    }

    /// Renders the templates against `context` and fills the open message.
    ///
    /// Template backends need a context; the static backend ignores it.
    /// The subject is rendered first, then the HTML body, then the text body,
    /// and a failure in one does not stop the others.
    pub fn compose(&mut self, context: Option<&TemplateContext>) -> &mut Self {
        if self.message.is_none() {
            self.errors.push(ScribeError::NotOpen);
            return self;
        }

        let Some(rendered) = self.render(context) else {
            return self;
        };

        if let Some(message) = self.message.as_mut() {
            message.set_priority(self.high_priority);
            message.set_subject(&rendered.subject);
            message.set_html_body(&rendered.html);
            message.set_text_body(&rendered.text);

            for attachment in &self.attachments {
                message.add_file(attachment.clone());
            }
        }

        debug!(template_type = %self.template_type(), "composed message");

        self
    }

    /// Copies the envelope addressing into the open message.
    pub fn seal(&mut self, envelope: &Envelope) -> &mut Self {
        match self.message.as_mut() {
            Some(message) => message.seal(envelope),
            None => self.errors.push(ScribeError::NotOpen),
        }

        self
    }

    /// The message being composed, if one is open.
    pub fn message_body(&self) -> Option<&MessageBody> {
        self.message.as_ref()
    }

    /// Builds the transport message, or returns every recorded error.
    pub fn message(&self) -> Result<Message, ScribeErrors> {
        if self.has_errors() {
            return Err(self.errors());
        }

        let body = self
            .message
            .as_ref()
            .ok_or_else(|| ScribeErrors::from(ScribeError::NotOpen))?;

        body.message()
            .map_err(|err| ScribeError::Message(err.to_string()).into())
    }

    /// Whether anything went wrong so far.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All recorded errors.
    pub fn errors(&self) -> ScribeErrors {
        ScribeErrors::from(self.errors.clone())
    }

    fn compile(&mut self, part: TemplatePart, source: &str) {
        let result = match &mut self.engine {
            Engine::Static(text) => {
                text.set(part, source);
                Ok(())
            }
            Engine::Handlebars(templates) => templates.compile(part, source),
            Engine::Tera(templates) => templates.compile(part, source),
        };

        if let Err(err) = result {
            self.errors.push(err);
        }
    }

    fn render(&mut self, context: Option<&TemplateContext>) -> Option<Rendered> {
        if let Engine::Static(text) = &self.engine {
            return Some(text.rendered());
        }

        let Some(context) = context else {
            self.errors
                .push(ScribeError::MissingContext(self.template_type()));
            return None;
        };

        let subject = self.render_part(TemplatePart::Subject, context);

        let html = self.render_part(TemplatePart::Html, context);
        let html = if html.is_empty() {
            html
        } else {
            inline_and_flatten(&html).unwrap_or_else(|err| {
                self.errors.push(err);
                String::new()
            })
        };

        let text = self.render_part(TemplatePart::Text, context);

        Some(Rendered { subject, text, html })
    }

    fn render_part(&mut self, part: TemplatePart, context: &TemplateContext) -> String {
        let result = match &self.engine {
            Engine::Static(text) => Ok(text.get(part).to_string()),
            Engine::Handlebars(templates) => templates.render(part, context),
            Engine::Tera(templates) => templates.render(part, context),
        };

        result.unwrap_or_else(|err| {
            self.errors.push(err);
            String::new()
        })
    }
}
