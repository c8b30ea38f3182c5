use std::path::PathBuf;

/// Errors from reading or writing the preference file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The preference file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file exists but is not a JSON object.
    #[error("Malformed preference file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
