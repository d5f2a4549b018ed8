use thiserror::Error;

/// Core error type for zipquery.
///
/// This is the synchronous caller-fault channel: malformed input, bad
/// adapter configuration, missing credentials. Remote and transport faults
/// never surface here; they travel as [`crate::outcome::ApiError`] values
/// inside a failed [`crate::outcome::Outcome`].
#[derive(Debug, Error)]
pub enum ZipQueryError {
    #[error("invalid code size: expected {expected}, got {actual} characters")]
    CodeSize {
        expected: &'static str,
        actual: usize,
    },

    #[error("invalid code format: expected {expected}")]
    CodeFormat { expected: &'static str },

    #[error("invalid {field}: below minimum of {min} characters")]
    FieldTooShort { field: &'static str, min: usize },

    #[error("invalid {field}: above maximum of {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CoreResult<T> = std::result::Result<T, ZipQueryError>;
