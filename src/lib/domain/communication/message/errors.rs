//! Message errors

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while building the transport message
#[derive(Debug, Error)]
pub enum MessageError {
    /// The message was never sealed with a sender
    #[error("message has no from address")]
    MissingSender,

    /// An attachment could not be read
    #[error("could not read attachment '{}': {source}", .path.display())]
    Attachment {
        /// The attachment path
        path: PathBuf,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An attachment content type was rejected
    #[error("invalid content type: {0}")]
    ContentType(String),

    /// The transport message could not be assembled
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
}
