//! # RelayPass Crypto
//!
//! Key material and the compact signed-token codec used by the login
//! handshake. A token is three base64url segments
//! (`header.payload.signature`) with a JSON header and payload, signed with
//! Ed25519 (`EdDSA`). Verification keys always come from the caller, never
//! from the token itself.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod keys;
pub mod token;

pub use error::{CryptoError, Result};
pub use keys::{KeyPair, PublicKey};
pub use token::{sign_claims, Claims, SignedToken, TokenHeader};
