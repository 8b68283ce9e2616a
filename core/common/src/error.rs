//! Common error types for Letterlock.

use thiserror::Error;

/// Top-level error type for Letterlock operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Cryptographic operation failed.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// A key string did not decode to a valid key.
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Authenticated decryption failed (wrong key, corrupted data, or tampering).
    ///
    /// Deliberately carries no detail: the cause must not be distinguishable
    /// by the viewer.
    #[error("The letter could not be opened")]
    DecryptionFailure,

    /// Required fields were missing or empty after trimming.
    #[error("Missing required fields: {}", fields.join(", "))]
    Validation {
        /// Wire names of the missing fields.
        fields: Vec<String>,
    },

    /// Storage backend read/write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Email dispatch failure. The letter row remains persisted.
    #[error("Notification error: {0}")]
    Notification(String),

    /// No letter exists for the given identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-level failure talking to a collaborator.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error naming the missing fields.
    pub fn missing_fields(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// HTTP status code class for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::InvalidInput(_) | Self::InvalidKeyFormat(_) => 400,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Stable error code string for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Crypto(_) => "crypto_error",
            Self::InvalidKeyFormat(_) => "invalid_key_format",
            Self::DecryptionFailure => "decryption_failure",
            Self::Validation { .. } => "validation_error",
            Self::Storage(_) => "storage_error",
            Self::Notification(_) => "notification_error",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization_error",
            Self::Network(_) => "network_error",
            Self::Config(_) => "configuration_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io_error",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
