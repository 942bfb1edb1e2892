//! Reads the JSON document `exec` runs against.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the document from inline text, a file, or stdin (no path or `-`).
pub fn load_document(
    document_text: Option<&str>,
    document_path: Option<&Path>,
) -> Result<Value, LoadError> {
    if let Some(text) = document_text {
        return parse(text, "inline document");
    }

    match document_path {
        Some(path) if path.as_os_str() != "-" => {
            let content = fs::read_to_string(path).map_err(|source| LoadError::File {
                path: path.to_path_buf(),
                source,
            })?;
            parse(&content, &format!("'{}'", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            parse(&buf, "stdin")
        }
    }
}

fn parse(text: &str, origin: &str) -> Result<Value, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Json {
        origin: origin.to_string(),
        source,
    })
}
