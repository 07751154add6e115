//! Mailer errors

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The transport could not be configured
    #[error("could not configure the smtp transport: {0}")]
    Transport(#[source] lettre::transport::smtp::Error),

    /// The server rejected the message or the connection failed
    #[error("could not send the email: {0}")]
    SendError(#[source] lettre::transport::smtp::Error),
}
