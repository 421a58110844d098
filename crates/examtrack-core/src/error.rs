//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the store, its storage backends and input validation.
///
/// Unparseable pasted lines are not errors and never appear here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A manual score percentage was non-numeric or outside 0..=100.
    #[error("invalid percentage '{input}': enter 0..100")]
    InvalidPercentage { input: String },

    /// An imported or persisted document could not be read as the data envelope.
    #[error("invalid data: {0}")]
    InvalidData(#[source] serde_json::Error),

    /// The state could not be serialized.
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required text field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_message_tells_the_range() {
        let err = StoreError::InvalidPercentage {
            input: "120".into(),
        };
        assert_eq!(err.to_string(), "invalid percentage '120': enter 0..100");
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/nope/data.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/nope/data.json"));
    }
}
