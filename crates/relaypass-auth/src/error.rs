//! Error types for chain validation and credential forging

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AuthError>;

/// Credential-validation errors. All are fatal to the handshake that
/// raised them; none are retryable.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A chain link failed to parse as a compact signed token
    #[error("Malformed chain link at index {index}: {reason}")]
    MalformedChainLink {
        /// Position of the offending link in the chain
        index: usize,
        /// Parse failure detail
        reason: String,
    },

    /// A link did not verify against its predecessor's key, or no link
    /// verified against the trust anchor
    #[error("Chain of trust broken: {0}")]
    ChainTrustFailure(String),

    /// `identityPublicKey` claim missing or not a well-formed key string
    #[error("identityPublicKey claim is missing or invalid")]
    MissingIdentityKey,

    /// `extraData` claim missing, not an object, or incomplete
    #[error("Authentication data was not found")]
    MissingAuthData,

    /// Identity UUID failed to parse
    #[error("Invalid identity UUID: {0}")]
    InvalidIdentity(String),

    /// Skin token signature did not verify against the identity key
    #[error("Skin token signature is invalid")]
    SkinSignatureInvalid,

    /// Underlying token or key failure
    #[error(transparent)]
    Crypto(#[from] relaypass_crypto::CryptoError),
}
