use std::fmt;

/// Result type for sybil-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, validating, or ingesting the
/// data model. `Csv`/`Json` surface here (rather than in `sybil-ingest`
/// alone) so ingestion collaborators can return the same `Result` type the
/// rest of the workspace uses.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),
    /// A settings field was outside its documented range
    InvalidSettings(String),
    /// CSV parsing or column-shape error
    Csv(String),
    /// JSON parsing error
    Json(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
            Error::Csv(msg) => write!(f, "CSV error: {}", msg),
            Error::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::InvalidSettings(_) | Error::Csv(_) | Error::Json(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
