//! # RelayPass Auth
//!
//! Verifies the certificate chain a client presents during login, extracts
//! the identity and skin claims it proves, and forges replacement
//! credentials under relay-controlled keys for the downstream leg.
//!
//! A certificate chain is an ordered sequence of compact signed tokens:
//! each link after the first must verify against the public key embedded in
//! the previous link's payload, and the chain as a whole must be rooted in
//! the authority key. Signing order is trust order.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod chain;
pub mod error;
pub mod forge;
pub mod identity;
pub mod skin;

#[cfg(test)]
pub(crate) mod test_support;

pub use chain::{validate_chain, ChainValidation};
pub use error::{AuthError, Result};
pub use forge::{forge_chain, forge_identity_token, forge_skin_token};
pub use identity::{extract_identity, Identity, IdentityClaims};
pub use skin::{verify_skin, SkinPayload};

use once_cell::sync::Lazy;
use relaypass_crypto::PublicKey;

/// Base64url form of the authority public key that roots every valid
/// certificate chain. Replaced per deployment; chains that never verify
/// against this key are rejected for forwarding.
pub const AUTHORITY_KEY_B64: &str = "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo";

static AUTHORITY_KEY: Lazy<PublicKey> = Lazy::new(|| {
    PublicKey::from_b64(AUTHORITY_KEY_B64).expect("embedded authority key is well formed")
});

/// The process-wide trust anchor. Decoded once at first use, never mutated.
pub fn authority_key() -> &'static PublicKey {
    &AUTHORITY_KEY
}
