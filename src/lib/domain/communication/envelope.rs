//! Envelope module.
//!
//! Collects the sender and recipient addresses of a single message. Input is
//! parsed as an address list, checked, normalized and routed into its slot.
//! Problems are accumulated instead of returned so every bad address can be
//! reported at once.

mod address;
mod errors;
mod normalizer;

use std::collections::BTreeSet;

use lettre::message::{Mailbox, Mailboxes};
use tracing::debug;

pub use address::{is_plausible, Address, AddressRole};
pub use errors::{EnvelopeError, EnvelopeErrors};
pub use normalizer::normalize;

/// The addressing of one message
#[derive(Debug, Default)]
pub struct Envelope {
    from: Option<Address>,
    reply_to: Option<Address>,
    to: BTreeSet<Address>,
    cc: BTreeSet<Address>,
    bcc: BTreeSet<Address>,
    from_submitted: bool,
    errors: Vec<EnvelopeError>,
}

impl Envelope {
    /// Creates an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender. Exactly one address is expected.
    pub fn set_from_address(&mut self, address: &str) {
        self.from_submitted = true;
        self.accept_address_string(address, AddressRole::From);
    }

    /// Sets the reply-to address. A blank string means no reply-to and is
    /// not an error.
    pub fn set_reply_to_address(&mut self, address: &str) {
        if address.trim().is_empty() {
            return;
        }

        self.accept_address_string(address, AddressRole::ReplyTo);
    }

    /// Adds one or more comma separated `To` recipients.
    pub fn add_to_address(&mut self, address: &str) {
        self.accept_address_string(address, AddressRole::To);
    }

    /// Adds every entry of `addresses` as `To` recipients.
    pub fn add_to_addresses<I, S>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accept_addresses(addresses, AddressRole::To);
    }

    /// Adds one or more comma separated `Cc` recipients.
    pub fn add_cc_address(&mut self, address: &str) {
        self.accept_address_string(address, AddressRole::Cc);
    }

    /// Adds every entry of `addresses` as `Cc` recipients.
    pub fn add_cc_addresses<I, S>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accept_addresses(addresses, AddressRole::Cc);
    }

    /// Adds one or more comma separated `Bcc` recipients.
    pub fn add_bcc_address(&mut self, address: &str) {
        self.accept_address_string(address, AddressRole::Bcc);
    }

    /// Adds every entry of `addresses` as `Bcc` recipients.
    pub fn add_bcc_addresses<I, S>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accept_addresses(addresses, AddressRole::Bcc);
    }

    /// The sender, once a valid one has been accepted.
    pub fn from_address(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    /// The reply-to address, if one was given.
    pub fn reply_to_address(&self) -> Option<&Address> {
        self.reply_to.as_ref()
    }

    /// `To` recipients in address order.
    pub fn to_addresses(&self) -> impl Iterator<Item = &Address> {
        self.to.iter()
    }

    /// `Cc` recipients in address order.
    pub fn cc_addresses(&self) -> impl Iterator<Item = &Address> {
        self.cc.iter()
    }

    /// `Bcc` recipients in address order.
    pub fn bcc_addresses(&self) -> impl Iterator<Item = &Address> {
        self.bcc.iter()
    }

    /// Whether any input was rejected, or no sender was ever given.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.missing_sender()
    }

    /// All recorded errors.
    pub fn errors(&self) -> EnvelopeErrors {
        let mut errors = self.errors.clone();

        if self.missing_sender() {
            errors.push(EnvelopeError::MissingSender);
        }

        EnvelopeErrors::from(errors)
    }

    fn missing_sender(&self) -> bool {
        self.from.is_none() && !self.from_submitted
    }

    fn accept_addresses<I, S>(&mut self, addresses: I, role: AddressRole)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for address in addresses {
            self.accept_address_string(address.as_ref(), role);
        }
    }

    /// Parses `input` as an address list and stores every acceptable address
    /// under `role`. Invalid addresses are recorded and left out.
    fn accept_address_string(&mut self, input: &str, role: AddressRole) {
        let input = input.trim();

        if input.is_empty() {
            self.errors.push(EnvelopeError::EmptyAddress(role));
            return;
        }

        let mailboxes = match input.parse::<Mailboxes>() {
            Ok(mailboxes) => mailboxes.into_iter().collect::<Vec<Mailbox>>(),
            Err(err) => {
                self.errors.push(EnvelopeError::Unparseable {
                    input: input.to_string(),
                    reason: err.to_string(),
                });
                return;
            }
        };

        if mailboxes.is_empty() {
            self.errors.push(EnvelopeError::EmptyAddress(role));
            return;
        }

        if role.is_singular() && mailboxes.len() > 1 {
            self.errors.push(EnvelopeError::TooManyAddresses(role));
        }

        for mailbox in mailboxes {
            if !is_plausible(&mailbox.email) {
                self.errors
                    .push(EnvelopeError::InvalidAddress(mailbox.email.to_string()));
                continue;
            }

            match Address::from_mailbox(mailbox) {
                Ok(address) => self.store(address, role),
                Err(err) => self
                    .errors
                    .push(EnvelopeError::InvalidAddress(err.to_string())),
            }
        }
    }

    fn store(&mut self, address: Address, role: AddressRole) {
        debug!(%role, address = address.as_str(), "accepted address");

        match role {
            AddressRole::From => self.from = Some(address),
            AddressRole::ReplyTo => self.reply_to = Some(address),
            AddressRole::To => {
                self.to.insert(address);
            }
            AddressRole::Cc => {
                self.cc.insert(address);
            }
            AddressRole::Bcc => {
                self.bcc.insert(address);
            }
        }
    }
}
