//! Delivery orchestration.
//!
//! [`deliver`] is the single entry point the binary uses: it validates the
//! [`Parameters`], builds the envelope, renders the message and hands it to
//! an SMTP courier. [`deliver_with`] runs the same pipeline against any
//! [`Mailer`].

use thiserror::Error;
use tracing::debug;

use crate::{
    domain::{
        communication::{
            envelope::{Envelope, EnvelopeErrors},
            mailer::{Mailer, MailerError},
            scribe::{load_template_string, Scribe, ScribeErrors, TemplateType},
        },
        params::Parameters,
    },
    infrastructure::email::smtp::SmtpCourier,
};

/// Delivery errors
#[derive(Debug, Error)]
pub enum DeliverError {
    /// A template type was chosen without any values to render
    #[error("template option '{0}' requires at least one parameter value")]
    MissingTemplateParameters(TemplateType),

    /// One or more addresses were rejected
    #[error(transparent)]
    Envelope(#[from] EnvelopeErrors),

    /// The message could not be rendered or built
    #[error(transparent)]
    Scribe(#[from] ScribeErrors),

    /// The transport failed
    #[error(transparent)]
    Mailer(#[from] MailerError),
}

/// Sends one email over SMTP as described by `params`.
pub fn deliver(params: &Parameters) -> Result<(), DeliverError> {
    deliver_with(params, &SmtpCourier::new(params.courier.clone()))
}

/// Sends one email through `mailer` as described by `params`.
///
/// Nothing reaches the mailer unless the envelope and the rendered message
/// are both error free.
pub fn deliver_with<M: Mailer>(params: &Parameters, mailer: &M) -> Result<(), DeliverError> {
    params.validate()?;

    let message = &params.message;

    let mut scribe = Scribe::new(message.template_type);
    scribe.set_priority(message.high_priority);
    scribe.set_subject_template(&message.subject);
    scribe.set_text_body_template(&load_template_string(&message.text_message));
    scribe.set_html_body_template(&load_template_string(&message.html_message));

    for path in &message.attachments {
        scribe.include(path, None);
    }

    scribe
        .open()
        .map_err(|err| DeliverError::Scribe(err.into()))?;

    let result = compose_and_send(params, &mut scribe, mailer);

    scribe.close();

    result
}

fn compose_and_send<M: Mailer>(
    params: &Parameters,
    scribe: &mut Scribe,
    mailer: &M,
) -> Result<(), DeliverError> {
    let addressing = &params.envelope;

    let mut envelope = Envelope::new();
    envelope.set_from_address(&addressing.send_from);
    envelope.set_reply_to_address(&addressing.reply_to);
    envelope.add_to_addresses(&addressing.send_to);
    envelope.add_cc_addresses(&addressing.send_cc);
    envelope.add_bcc_addresses(&addressing.send_bcc);

    if envelope.has_errors() {
        return Err(envelope.errors().into());
    }

    let context = match scribe.template_type() {
        TemplateType::None => None,
        _ => Some(&params.message.template_data),
    };

    scribe.compose(context).seal(&envelope);

    let message = scribe.message()?;

    debug!(
        template_type = %scribe.template_type(),
        recipients = message.envelope().to().len(),
        "message ready for delivery"
    );

    mailer.deliver(&message)?;

    Ok(())
}
