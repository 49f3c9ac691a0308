//! Session key material
//!
//! `KeyPair` is the Ed25519 signing pair the relay generates per downstream
//! connection; `PublicKey` is the verifying half as it appears inside token
//! payloads (base64url, no padding).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::ZeroizeOnDrop;

use crate::error::{CryptoError, Result};

/// Ed25519 verifying key as carried in `identityPublicKey` claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Decode from the base64url claim representation.
    pub fn from_b64(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid base64: {e}")))?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidKey(format!("key must be 32 bytes, got {}", bytes.len()))
        })?;
        let key =
            VerifyingKey::from_bytes(&arr).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// Encode to the base64url claim representation.
    pub fn to_b64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Verify a detached signature over `msg`.
    pub fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<()> {
        let sig_bytes: [u8; 64] = sig.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        let sig = Signature::from_bytes(&sig_bytes);
        self.0
            .verify(msg, &sig)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

/// Signing key pair. The secret half is cleared from memory on drop and is
/// never persisted.
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    secret_bytes: [u8; 32],
}

impl KeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self {
            secret_bytes: signing_key.to_bytes(),
        }
    }

    /// Restore from 32 secret bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            secret_bytes: *bytes,
        }
    }

    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.secret_bytes)
    }

    /// The verifying half.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key().verifying_key())
    }

    /// Sign arbitrary bytes; returns the 64-byte detached signature.
    pub fn sign(&self, msg: &[u8]) -> [u8; 64] {
        self.signing_key().sign(msg).to_bytes()
    }
}
