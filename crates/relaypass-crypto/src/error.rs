//! Error types for key and token operations

use thiserror::Error;

/// Result type alias for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during key and token operations
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Input did not parse as a compact signed token
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Public key is not well formed
    #[error("Invalid public key: {0}")]
    InvalidKey(String),

    /// Signature verification failed
    #[error("Invalid signature")]
    InvalidSignature,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::Serialization(err.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for CryptoError {
    fn from(_: ed25519_dalek::SignatureError) -> Self {
        CryptoError::InvalidSignature
    }
}
