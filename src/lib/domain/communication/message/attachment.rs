//! File attachments

use std::{
    fs,
    path::{Path, PathBuf},
};

use lettre::message::{header::ContentType, SinglePart};

use super::MessageError;

/// A file to attach to a message. The file is only read when the message is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    path: PathBuf,
    name: Option<String>,
}

impl Attachment {
    /// Creates an attachment for `path`, shown to the recipient as `name`
    /// (the file name when `None` or blank).
    pub fn new(path: impl Into<PathBuf>, name: Option<&str>) -> Self {
        Self {
            path: path.into(),
            name: name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    /// The file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name shown to the recipient.
    pub fn file_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string()),
        }
    }

    /// The MIME type guessed from the file extension, `application/octet-stream`
    /// when unknown.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.path)
            .first_or_octet_stream()
            .to_string()
    }

    /// Reads the file and wraps it in a MIME part.
    pub(super) fn to_part(&self) -> Result<SinglePart, MessageError> {
        let content = fs::read(&self.path).map_err(|source| MessageError::Attachment {
            path: self.path.clone(),
            source,
        })?;

        let content_type = ContentType::parse(&self.mime_type())
            .map_err(|err| MessageError::ContentType(err.to_string()))?;

        Ok(lettre::message::Attachment::new(self.file_name()).body(content, content_type))
    }
}
