//! Skin-token verification
//!
//! The client submits its skin as a signed token separate from the
//! certificate chain. Only the signature is checked here; the payload is
//! opaque pass-through data whose fields the relay never interprets.

use relaypass_crypto::{Claims, PublicKey, SignedToken};

use crate::error::{AuthError, Result};

/// A verified skin payload, carried through to the downstream leg
/// unchanged.
#[derive(Clone, Debug)]
pub struct SkinPayload(Claims);

impl SkinPayload {
    /// The underlying claim map.
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Parse the skin token and verify it against the client's identity key.
pub fn verify_skin(token: &str, identity_key: &PublicKey) -> Result<SkinPayload> {
    let token = SignedToken::parse(token)?;
    token
        .verify(identity_key)
        .map_err(|_| AuthError::SkinSignatureInvalid)?;
    Ok(SkinPayload(token.into_payload()))
}
