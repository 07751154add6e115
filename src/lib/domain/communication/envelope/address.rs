//! Email Address

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use lazy_static::lazy_static;
use lettre::{address::AddressError, message::Mailbox};
use regex::Regex;

use super::normalizer::normalize;

lazy_static! {
    static ref DOMAIN_REGEX: Regex =
        Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").unwrap();
}

/// The slot of an [`Envelope`](super::Envelope) an address is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRole {
    /// The sender
    From,

    /// The address replies are sent to
    ReplyTo,

    /// Primary recipients
    To,

    /// Carbon copy recipients
    Cc,

    /// Blind carbon copy recipients
    Bcc,
}

impl AddressRole {
    /// Whether the role holds at most one address.
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::From | Self::ReplyTo)
    }
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            Self::From => "from",
            Self::ReplyTo => "reply to",
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        };

        write!(f, "{role}")
    }
}

/// Checks that a syntactically valid address also looks deliverable: a
/// non-empty local part and a dotted domain ending in an alphabetic TLD.
pub fn is_plausible(email: &lettre::Address) -> bool {
    !email.user().is_empty() && DOMAIN_REGEX.is_match(email.domain())
}

/// A normalized email address with an optional display name.
///
/// Two addresses are equal when their normalized address strings are equal,
/// whatever their display names.
#[derive(Clone, Debug)]
pub struct Address {
    name: Option<String>,
    email: lettre::Address,
}

impl Address {
    /// Builds an address from a parsed mailbox, normalizing the address part.
    pub fn from_mailbox(mailbox: Mailbox) -> Result<Self, AddressError> {
        let email = normalize(mailbox.email.as_ref()).parse()?;
        let name = mailbox.name.filter(|name| !name.trim().is_empty());

        Ok(Self { name, email })
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The normalized address.
    pub fn email(&self) -> &lettre::Address {
        &self.email
    }

    /// The normalized address as a string slice.
    pub fn as_str(&self) -> &str {
        self.email.as_ref()
    }

    /// Converts into a [`Mailbox`] for message headers.
    pub fn to_mailbox(&self) -> Mailbox {
        Mailbox::new(self.name.clone(), self.email.clone())
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mailbox())
    }
}

impl From<&Address> for Mailbox {
    fn from(address: &Address) -> Self {
        address.to_mailbox()
    }
}
