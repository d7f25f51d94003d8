use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON string map: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing required field: {0}")]
    MissingCredentials(&'static str),

    #[error("stored user data is unreadable: {0}")]
    CorruptUserData(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] SessionError),
}
