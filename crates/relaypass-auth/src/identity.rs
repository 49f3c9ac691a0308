//! Identity extraction
//!
//! Pulls the structured identity claims out of the terminal chain link's
//! payload. Pure extraction; the chain validator has already verified that
//! link's signature.

use serde_json::Value;
use uuid::Uuid;

use relaypass_crypto::{Claims, PublicKey};

use crate::error::{AuthError, Result};

/// Claims the relay consumes from `extraData`, plus the complete original
/// object so claims the relay does not interpret survive re-signing
/// untouched.
#[derive(Clone, Debug)]
pub struct IdentityClaims {
    /// Player display name
    pub display_name: String,
    /// Stable player identity
    pub identity: Uuid,
    /// Platform user id (`XUID` on the wire)
    pub xuid: String,
    extra_data: Claims,
}

impl IdentityClaims {
    /// The original `extraData` object, order- and content-preserving.
    pub fn extra_data(&self) -> &Claims {
        &self.extra_data
    }
}

/// A verified identity: the extracted claims and the public key the client
/// signs with from here on.
#[derive(Clone, Debug)]
pub struct Identity {
    /// Extracted claims
    pub claims: IdentityClaims,
    /// Client identity public key
    pub public_key: PublicKey,
}

/// Extract the identity claims and identity key from the terminal link's
/// payload.
pub fn extract_identity(terminal_payload: &Claims) -> Result<Identity> {
    let extra_data = match terminal_payload.get("extraData") {
        Some(Value::Object(map)) => map.clone(),
        _ => return Err(AuthError::MissingAuthData),
    };

    let display_name = string_claim(&extra_data, "displayName")?;
    let identity_str = string_claim(&extra_data, "identity")?;
    let xuid = string_claim(&extra_data, "XUID")?;

    let identity = Uuid::parse_str(&identity_str)
        .map_err(|e| AuthError::InvalidIdentity(format!("{identity_str}: {e}")))?;

    let public_key = match terminal_payload.get("identityPublicKey") {
        Some(Value::String(s)) => {
            PublicKey::from_b64(s).map_err(|_| AuthError::MissingIdentityKey)?
        }
        _ => return Err(AuthError::MissingIdentityKey),
    };

    Ok(Identity {
        claims: IdentityClaims {
            display_name,
            identity,
            xuid,
            extra_data,
        },
        public_key,
    })
}

fn string_claim(map: &Claims, name: &str) -> Result<String> {
    match map.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(AuthError::MissingAuthData),
    }
}
