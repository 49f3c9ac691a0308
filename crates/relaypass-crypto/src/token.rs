//! Compact signed tokens
//!
//! The login handshake carries identity and skin data as compact signed
//! tokens: `base64url(header) . base64url(payload) . base64url(signature)`
//! with a JSON header and a JSON object payload. The only accepted
//! algorithm is `EdDSA`. The raw compact form is retained after parsing so
//! links that pass through the relay unmodified stay byte-identical.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CryptoError, Result};
use crate::keys::{KeyPair, PublicKey};

/// Claim map for token payloads. Insertion order is preserved so a
/// re-serialized payload stays byte-identical to its source.
pub type Claims = serde_json::Map<String, Value>;

/// Token header. `x5u` carries the signer's public key for hop-by-hop
/// inspection; it is advisory and never used as a verification key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signature algorithm; always `EdDSA`.
    pub alg: String,
    /// Signer public key, base64url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x5u: Option<String>,
}

/// A parsed compact signed token.
#[derive(Clone, Debug)]
pub struct SignedToken {
    header: TokenHeader,
    payload: Claims,
    signature: Vec<u8>,
    signing_input: String,
    raw: String,
}

impl SignedToken {
    /// Parse the compact serialization without verifying the signature.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split('.');
        let (header_b64, payload_b64, sig_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(p), Some(s), None) => (h, p, s),
                _ => {
                    return Err(CryptoError::MalformedToken(
                        "expected three dot-separated segments".into(),
                    ))
                }
            };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|e| CryptoError::MalformedToken(format!("header: {e}")))?;
        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|e| CryptoError::MalformedToken(format!("payload: {e}")))?;
        let signature = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|e| CryptoError::MalformedToken(format!("signature: {e}")))?;

        let header: TokenHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| CryptoError::MalformedToken(format!("header: {e}")))?;
        if header.alg != "EdDSA" {
            return Err(CryptoError::MalformedToken(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }
        let payload: Claims = serde_json::from_slice(&payload_bytes)
            .map_err(|e| CryptoError::MalformedToken(format!("payload: {e}")))?;

        Ok(Self {
            header,
            payload,
            signature,
            signing_input: format!("{header_b64}.{payload_b64}"),
            raw: raw.to_string(),
        })
    }

    /// Verify the signature against `key`.
    pub fn verify(&self, key: &PublicKey) -> Result<()> {
        key.verify(self.signing_input.as_bytes(), &self.signature)
    }

    /// The parsed header.
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// The payload claim map.
    pub fn payload(&self) -> &Claims {
        &self.payload
    }

    /// Consume the token, returning its payload.
    pub fn into_payload(self) -> Claims {
        self.payload
    }

    /// The original compact serialization.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Sign a claim map with `keys`, producing a new compact token.
pub fn sign_claims(keys: &KeyPair, claims: &Claims) -> Result<SignedToken> {
    let header = TokenHeader {
        alg: "EdDSA".to_string(),
        x5u: Some(keys.public_key().to_b64()),
    };
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
    let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = keys.sign(signing_input.as_bytes());
    let raw = format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature));

    Ok(SignedToken {
        header,
        payload: claims.clone(),
        signature: signature.to_vec(),
        signing_input,
        raw,
    })
}
