//! Scribe errors

use std::{error::Error as StdError, fmt};

use thiserror::Error;

use super::{TemplatePart, TemplateType};

/// A problem raised while preparing or rendering a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScribeError {
    /// `open` was called while a message was still in progress
    #[error("cannot start a new message while there is an existing one")]
    AlreadyOpen,

    /// The scribe was used before `open`
    #[error("no message has been opened")]
    NotOpen,

    /// A template scribe was composed without a context
    #[error("{0} templates must be composed with exactly one context")]
    MissingContext(TemplateType),

    /// A template failed to compile
    #[error("could not compile the {part} template: {reason}")]
    Compile {
        /// Which template
        part: TemplatePart,

        /// The engine's explanation
        reason: String,
    },

    /// A template failed to render
    #[error("could not render the {part} template: {reason}")]
    Render {
        /// Which template
        part: TemplatePart,

        /// The engine's explanation
        reason: String,
    },

    /// CSS could not be inlined into the HTML body
    #[error("could not inline css: {0}")]
    InlineCss(String),

    /// The transport message could not be built
    #[error("{0}")]
    Message(String),
}

/// Every error collected by a [`Scribe`](super::Scribe)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScribeErrors(Vec<ScribeError>);

impl ScribeErrors {
    /// The individual errors, in the order they were recorded.
    pub fn errors(&self) -> &[ScribeError] {
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

impl From<Vec<ScribeError>> for ScribeErrors {
    fn from(errors: Vec<ScribeError>) -> Self {
        Self(errors)
    }
}

impl From<ScribeError> for ScribeErrors {
    fn from(error: ScribeError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ScribeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();

        write!(
            f,
            "scribe encountered {} error(s): {}",
            self.0.len(),
            details.join(", ")
        )
    }
}

impl StdError for ScribeErrors {}

/// Flattens an error and its sources into one line.
pub(super) fn describe(err: &dyn StdError) -> String {
    let mut description = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }

    description
}
