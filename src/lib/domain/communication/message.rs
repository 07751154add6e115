//! Message body module.
//!
//! [`MessageBody`] is a small stateful builder that gathers the rendered
//! parts of one email and assembles the transport [`Message`] on demand.

mod attachment;
mod errors;
mod priority;

use std::path::PathBuf;

use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    Message,
};

use crate::domain::communication::envelope::{Address, Envelope};

pub use attachment::Attachment;
pub use errors::MessageError;
pub use priority::{Importance, Priority, XPriority};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Text(String),
    Html(String),
}

enum Content {
    Single(SinglePart),
    Multi(MultiPart),
}

/// The rendered parts of one email
#[derive(Debug, Default)]
pub struct MessageBody {
    subject: String,
    body: Option<Body>,
    alternative_text: Option<String>,
    text_as_alternative: bool,
    priority: Priority,
    attachments: Vec<Attachment>,
    from: Option<Mailbox>,
    reply_to: Option<Mailbox>,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    bcc: Vec<Mailbox>,
}

impl MessageBody {
    /// Creates an empty message body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subject line.
    pub fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
    }

    /// Sets the plain text body. When an HTML body has already been set the
    /// text becomes its alternative representation, otherwise it is the
    /// primary body. An empty string has no effect.
    pub fn set_text_body(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.text_as_alternative {
            self.alternative_text = Some(text.to_string());
        } else {
            self.body = Some(Body::Text(text.to_string()));
        }
    }

    /// Sets the HTML body and makes any text set afterwards its alternative.
    /// An empty string only flags later text as the primary body again.
    pub fn set_html_body(&mut self, html: &str) {
        self.text_as_alternative = false;

        if !html.is_empty() {
            self.body = Some(Body::Html(html.to_string()));
            self.text_as_alternative = true;
        }
    }

    /// Raises the priority to high when `is_high` is set, otherwise resets it
    /// to normal.
    pub fn set_priority(&mut self, is_high: bool) {
        self.priority = if is_high {
            Priority::High
        } else {
            Priority::Normal
        };
    }

    /// Marks the message as high priority.
    pub fn set_priority_high(&mut self) {
        self.priority = Priority::High;
    }

    /// Marks the message as low priority.
    pub fn set_priority_low(&mut self) {
        self.priority = Priority::Low;
    }

    /// Attaches the file at `path`, optionally under a different name.
    pub fn add_attachment(&mut self, path: impl Into<PathBuf>, name: Option<&str>) {
        self.add_file(Attachment::new(path, name));
    }

    /// Attaches a file.
    pub fn add_file(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Copies the envelope addressing into the message.
    ///
    /// The envelope is expected to be error free; nothing is checked here.
    pub fn seal(&mut self, envelope: &Envelope) {
        self.from = envelope.from_address().map(Address::to_mailbox);

        if let Some(reply_to) = envelope.reply_to_address() {
            self.reply_to = Some(reply_to.to_mailbox());
        }

        self.to = envelope.to_addresses().map(Address::to_mailbox).collect();
        self.cc = envelope.cc_addresses().map(Address::to_mailbox).collect();
        self.bcc = envelope.bcc_addresses().map(Address::to_mailbox).collect();
    }

    /// The subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The plain text body, primary or alternative.
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Some(Body::Text(text)) => Some(text),
            _ => self.alternative_text.as_deref(),
        }
    }

    /// The HTML body.
    pub fn html_body(&self) -> Option<&str> {
        match &self.body {
            Some(Body::Html(html)) => Some(html),
            _ => None,
        }
    }

    /// Whether the text body is sent as the alternative of the HTML body.
    pub fn is_text_alternative(&self) -> bool {
        matches!(self.body, Some(Body::Html(_))) && self.alternative_text.is_some()
    }

    /// The message priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Attached files.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Assembles the transport message. Attachments are read from disk here.
    pub fn message(&self) -> Result<Message, MessageError> {
        let from = self.from.clone().ok_or(MessageError::MissingSender)?;

        let mut builder = Message::builder()
            .from(from)
            .subject(self.subject.clone());

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.clone());
        }

        for to in &self.to {
            builder = builder.to(to.clone());
        }

        for cc in &self.cc {
            builder = builder.cc(cc.clone());
        }

        for bcc in &self.bcc {
            builder = builder.bcc(bcc.clone());
        }

        if self.priority != Priority::Normal {
            builder = builder
                .header(XPriority(self.priority))
                .header(Importance(self.priority));
        }

        let content = self.content();

        if self.attachments.is_empty() {
            let message = match content {
                Content::Single(part) => builder.singlepart(part)?,
                Content::Multi(part) => builder.multipart(part)?,
            };

            return Ok(message);
        }

        let mut mixed = match content {
            Content::Single(part) => MultiPart::mixed().singlepart(part),
            Content::Multi(part) => MultiPart::mixed().multipart(part),
        };

        for attachment in &self.attachments {
            mixed = mixed.singlepart(attachment.to_part()?);
        }

        Ok(builder.multipart(mixed)?)
    }

    /// The raw RFC 5322 text of the assembled message.
    pub fn formatted(&self) -> Result<String, MessageError> {
        let message = self.message()?;

        Ok(String::from_utf8_lossy(&message.formatted()).into_owned())
    }

    fn content(&self) -> Content {
        match (&self.body, &self.alternative_text) {
            (Some(Body::Html(html)), Some(text)) => Content::Multi(
                MultiPart::alternative_plain_html(text.clone(), html.clone()),
            ),
            (Some(Body::Html(html)), None) => Content::Single(SinglePart::html(html.clone())),
            (Some(Body::Text(text)), _) => Content::Single(SinglePart::plain(text.clone())),
            (None, _) => Content::Single(SinglePart::plain(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn envelope() -> Envelope {
        let mut envelope = Envelope::new();
        envelope.set_from_address("sender@email.com");
        envelope.add_to_address("receiver@email.com");
        envelope
    }

    fn header_line<'a>(formatted: &'a str, name: &str) -> Option<&'a str> {
        formatted
            .lines()
            .find(|line| line.starts_with(&format!("{name}: ")))
    }

    #[test]
    fn test_text_after_html_is_alternative() {
        let mut body = MessageBody::new();
        body.set_html_body("<p>Hello</p>");
        body.set_text_body("Hello");

        assert!(body.is_text_alternative());
        assert_eq!(body.html_body(), Some("<p>Hello</p>"));
        assert_eq!(body.text_body(), Some("Hello"));
    }

    #[test]
    fn test_text_before_html_is_primary_until_html_is_set() {
        let mut body = MessageBody::new();
        body.set_text_body("Hello");

        assert!(!body.is_text_alternative());
        assert_eq!(body.text_body(), Some("Hello"));
        assert_eq!(body.html_body(), None);

        body.set_html_body("<p>Hello</p>");

        assert_eq!(body.html_body(), Some("<p>Hello</p>"));
        assert!(!body.is_text_alternative());
    }

    #[test]
    fn test_empty_bodies_do_not_clear() {
        let mut body = MessageBody::new();
        body.set_text_body("Hello");
        body.set_text_body("");
        body.set_html_body("");

        assert_eq!(body.text_body(), Some("Hello"));
        assert_eq!(body.html_body(), None);
    }

    #[test]
    fn test_empty_html_resets_alternative_flag() {
        let mut body = MessageBody::new();
        body.set_html_body("<p>Hi</p>");
        body.set_html_body("");
        body.set_text_body("Hi");

        assert_eq!(body.text_body(), Some("Hi"));
        assert_eq!(body.html_body(), None);
    }

    #[test]
    fn test_priority() {
        let mut body = MessageBody::new();
        assert_eq!(body.priority(), Priority::Normal);

        body.set_priority(true);
        assert_eq!(body.priority(), Priority::High);

        body.set_priority(false);
        assert_eq!(body.priority(), Priority::Normal);

        body.set_priority_low();
        assert_eq!(body.priority(), Priority::Low);
    }

    #[test]
    fn test_unsealed_message_has_no_sender() {
        let mut body = MessageBody::new();
        body.set_text_body("Hello");

        assert!(matches!(body.message(), Err(MessageError::MissingSender)));
    }

    #[test]
    fn test_sealed_text_message() -> TestResult {
        let mut body = MessageBody::new();
        body.set_subject("Hi");
        body.set_text_body("Hello");
        body.seal(&envelope());

        let formatted = body.formatted()?;

        assert_eq!(
            header_line(&formatted, "From"),
            Some("From: sender@email.com")
        );
        assert_eq!(
            header_line(&formatted, "To"),
            Some("To: receiver@email.com")
        );
        assert_eq!(header_line(&formatted, "Subject"), Some("Subject: Hi"));
        assert!(formatted.contains("Hello"));
        assert!(header_line(&formatted, "X-Priority").is_none());

        Ok(())
    }

    #[test]
    fn test_sealing_twice_does_not_duplicate_recipients() -> TestResult {
        let mut body = MessageBody::new();
        body.set_text_body("Hello");
        body.seal(&envelope());
        body.seal(&envelope());

        let message = body.message()?;

        assert_eq!(message.envelope().to().len(), 1);
        assert_eq!(
            header_line(&body.formatted()?, "To"),
            Some("To: receiver@email.com")
        );

        Ok(())
    }

    #[test]
    fn test_sealed_message_carries_reply_to_and_priority() -> TestResult {
        let mut envelope = envelope();
        envelope.set_reply_to_address("Help Desk <help@email.com>");

        let mut body = MessageBody::new();
        body.set_subject("Urgent");
        body.set_text_body("Call me");
        body.set_priority_high();
        body.seal(&envelope);

        let formatted = body.formatted()?;

        assert!(header_line(&formatted, "Reply-To").is_some_and(|l| l.contains("help@email.com")));
        assert_eq!(
            header_line(&formatted, "X-Priority"),
            Some("X-Priority: 1 (Highest)")
        );
        assert_eq!(header_line(&formatted, "Importance"), Some("Importance: high"));

        Ok(())
    }

    #[test]
    fn test_html_with_alternative_is_multipart() -> TestResult {
        let mut body = MessageBody::new();
        body.set_subject("Hi");
        body.set_html_body("<p>Hello</p>");
        body.set_text_body("Hello");
        body.seal(&envelope());

        let formatted = body.formatted()?;

        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("<p>Hello</p>"));

        Ok(())
    }

    #[test]
    fn test_attachments_are_read_when_building() -> TestResult {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/welcome.txt");

        let mut body = MessageBody::new();
        body.set_subject("Report");
        body.set_text_body("See attached");
        body.add_attachment(path, Some("notes.txt"));
        body.seal(&envelope());

        let formatted = body.formatted()?;

        assert_eq!(body.attachments().len(), 1);
        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("notes.txt"));

        Ok(())
    }

    #[test]
    fn test_unreadable_attachment_fails_the_build() {
        let mut body = MessageBody::new();
        body.set_text_body("See attached");
        body.add_attachment("no/such/file.pdf", None);
        body.seal(&envelope());

        assert!(matches!(
            body.message(),
            Err(MessageError::Attachment { .. })
        ));
    }
}
