//! Template source loading

use std::fs;

use tracing::{debug, warn};

/// Inputs at least this long are never treated as a path unless they
/// contain a path separator.
const MAX_PATH_LENGTH: usize = 1024;

fn looks_like_path(source: &str) -> bool {
    if source.contains(['\n', '\r']) {
        return false;
    }

    source.contains(['/', '\\']) || source.len() < MAX_PATH_LENGTH
}

/// Returns the contents of the file named by `source` when it looks like a
/// path to a readable file, otherwise `source` itself.
///
/// Precedence:
/// 1. a blank value yields an empty string;
/// 2. a value spanning several lines is always template text;
/// 3. a value containing `/` or `\`, or shorter than 1024 bytes, is tried as a path;
/// 4. any failure to find or read the file falls back to the literal value.
pub fn load_template_string(source: &str) -> String {
    if source.trim().is_empty() {
        return String::new();
    }

    if !looks_like_path(source) {
        return source.to_string();
    }

    match fs::metadata(source) {
        Ok(metadata) if metadata.is_file() => match fs::read_to_string(source) {
            Ok(content) => {
                debug!(path = source, "loaded template from file");
                content
            }
            Err(err) => {
                warn!(path = source, error = %err, "could not read template file, using value as text");
                source.to_string()
            }
        },
        _ => source.to_string(),
    }
}
