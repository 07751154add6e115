//! Email composition and delivery.
//!
//! An [`Envelope`](envelope::Envelope) collects and validates the addresses,
//! a [`Scribe`](scribe::Scribe) renders the templates into a
//! [`MessageBody`](message::MessageBody), and a [`Mailer`](mailer::Mailer)
//! hands the finished message to a transport.

pub mod envelope;
pub mod mailer;
pub mod message;
pub mod scribe;
