//! Envelope errors

use std::fmt;

use thiserror::Error;

use super::AddressRole;

/// A problem with one piece of address input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// No address was given where at least one was expected
    #[error("an empty string was provided for the {0} address")]
    EmptyAddress(AddressRole),

    /// The input is not a valid address list
    #[error("could not parse '{input}': {reason}")]
    Unparseable {
        /// The raw input
        input: String,

        /// Why parsing failed
        reason: String,
    },

    /// No sender address was ever given
    #[error("a from address is required")]
    MissingSender,

    /// Several addresses were given for a single-address role
    #[error("there can only be one {0} email address")]
    TooManyAddresses(AddressRole),

    /// The address parsed but does not look deliverable
    #[error("'{0}' is an invalid email address")]
    InvalidAddress(String),
}

/// Every error collected by an [`Envelope`](super::Envelope)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeErrors(Vec<EnvelopeError>);

impl EnvelopeErrors {
    /// The individual errors, in the order they were recorded.
    pub fn errors(&self) -> &[EnvelopeError] {
        &self.0
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<EnvelopeError>> for EnvelopeErrors {
    fn from(errors: Vec<EnvelopeError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for EnvelopeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();

        write!(
            f,
            "{} envelope error(s): {}",
            self.0.len(),
            details.join(", ")
        )
    }
}

impl std::error::Error for EnvelopeErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_errors_display_joins_with_count() {
        let errors = EnvelopeErrors::from(vec![
            EnvelopeError::EmptyAddress(AddressRole::From),
            EnvelopeError::InvalidAddress("root@localhost".to_string()),
        ]);

        assert_eq!(
            errors.to_string(),
            "2 envelope error(s): an empty string was provided for the from address, \
             'root@localhost' is an invalid email address"
        );
    }
}
