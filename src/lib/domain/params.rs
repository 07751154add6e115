//! Delivery parameters

use std::path::PathBuf;

use serde_json::Value;

use crate::{
    domain::{communication::scribe::{TemplateContext, TemplateType}, deliver::DeliverError},
    infrastructure::email::smtp::CourierConfig,
};

/// Who the message is from and who receives it. Every value is raw user
/// input; parsing happens in the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeParams {
    /// The sender
    pub send_from: String,

    /// Optional reply address, empty when unset
    pub reply_to: String,

    /// Primary recipients
    pub send_to: Vec<String>,

    /// Carbon copy recipients
    pub send_cc: Vec<String>,

    /// Blind carbon copy recipients
    pub send_bcc: Vec<String>,
}

/// What the message says
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageParams {
    /// Send with high priority headers
    pub high_priority: bool,

    /// Subject template
    pub subject: String,

    /// Text body template, or a path to one
    pub text_message: String,

    /// HTML body template, or a path to one
    pub html_message: String,

    /// How the templates are rendered
    pub template_type: TemplateType,

    /// Values substituted into the templates
    pub template_data: TemplateContext,

    /// Files to attach
    pub attachments: Vec<PathBuf>,
}

/// Everything needed for one delivery
#[derive(Debug, Clone)]
pub struct Parameters {
    /// SMTP connection settings
    pub courier: CourierConfig,

    /// Addressing
    pub envelope: EnvelopeParams,

    /// Content
    pub message: MessageParams,
}

impl Parameters {
    /// Creates parameters with empty addressing and content.
    pub fn new(courier: CourierConfig) -> Self {
        Self {
            courier,
            envelope: EnvelopeParams::default(),
            message: MessageParams::default(),
        }
    }

    /// Stores `message` as the HTML body when `html` is set, otherwise as the
    /// text body.
    pub fn set_message(&mut self, message: impl Into<String>, html: bool) {
        if html {
            self.message.html_message = message.into();
        } else {
            self.message.text_message = message.into();
        }
    }

    /// Replaces the template data with the given pairs.
    pub fn set_template_data<I, K, V>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.message.template_data = data.into_iter().collect();
    }

    /// Checks the combination of options before anything is rendered.
    pub fn validate(&self) -> Result<(), DeliverError> {
        let template_type = self.message.template_type;

        if template_type.requires_context() && self.message.template_data.is_empty() {
            return Err(DeliverError::MissingTemplateParameters(template_type));
        }

        Ok(())
    }
}
