//! Proxy error types

use thiserror::Error;

use crate::login::VersionCheck;

/// Result type alias
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Handshake-fatal errors. A session either completes the full sequence
/// through handoff or is discarded; none of these are retryable.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Client credential validation failed
    #[error(transparent)]
    Auth(#[from] relaypass_auth::AuthError),

    /// Certificate document is missing its `chain` array
    #[error("Certificate data is not valid: {0}")]
    InvalidCertificateFormat(String),

    /// Declared protocol version differs from the supported one
    #[error("Unsupported protocol version {declared} (supported {supported}, peer is {classification:?})")]
    UnsupportedProtocol {
        /// Version the peer declared
        declared: i32,
        /// The pinned supported version
        supported: i32,
        /// Which side is out of date
        classification: VersionCheck,
    },

    /// Downstream server could not be reached. Reported distinctly from
    /// upstream validation failures so operators can tell client
    /// credential problems from infrastructure problems.
    #[error("Downstream connection failed: {0}")]
    DownstreamConnect(String),

    /// Message (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Serialization(err.to_string())
    }
}
