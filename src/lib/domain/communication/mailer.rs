//! Mailer module

mod errors;

use lettre::Message;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;

/// Hands a finished message to a transport
pub trait Mailer {
    /// Send a message
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to send. Its envelope is derived from the
    ///   From, To, Cc and Bcc headers.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    fn deliver(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Mailer for Mailer {
        fn deliver(&self, message: &Message) -> Result<(), MailerError>;
    }
}
