//! Certificate-chain validation
//!
//! Walks the login certificate chain in order, maintaining the key each
//! link hands to its successor. The chain becomes trusted once any link
//! verifies against the authority key; link-to-link continuity is
//! mandatory for every adjacent pair.

use serde_json::Value;
use tracing::debug;

use relaypass_crypto::{Claims, PublicKey, SignedToken};

use crate::error::{AuthError, Result};

/// Outcome of a full chain traversal.
#[derive(Debug)]
pub struct ChainValidation {
    /// Whether some link verified against the trust anchor.
    pub trusted: bool,
    /// Payload of the terminal link, holding the client's current claims.
    pub terminal_payload: Claims,
    /// Public key embedded in the terminal link's payload.
    pub terminal_key: PublicKey,
}

impl ChainValidation {
    /// Reject traversals that never verified against the anchor.
    pub fn require_trusted(self) -> Result<Self> {
        if !self.trusted {
            return Err(AuthError::ChainTrustFailure(
                "no link verifies against the trust anchor".into(),
            ));
        }
        Ok(self)
    }
}

/// Validate `links` against `anchor`, in order.
///
/// Fails on the first malformed link, broken link-to-link signature, or
/// missing `identityPublicKey` claim. A signature that merely fails the
/// anchor check is not an error; it leaves `trusted` false until a later
/// link verifies.
pub fn validate_chain(links: &[String], anchor: &PublicKey) -> Result<ChainValidation> {
    if links.is_empty() {
        return Err(AuthError::MalformedChainLink {
            index: 0,
            reason: "chain is empty".into(),
        });
    }

    let mut trusted = false;
    let mut last_key: Option<PublicKey> = None;
    let mut terminal_payload: Option<Claims> = None;

    for (index, raw) in links.iter().enumerate() {
        let token = SignedToken::parse(raw).map_err(|e| AuthError::MalformedChainLink {
            index,
            reason: e.to_string(),
        })?;

        if !trusted {
            trusted = token.verify(anchor).is_ok();
        }

        if let Some(ref key) = last_key {
            token.verify(key).map_err(|_| {
                AuthError::ChainTrustFailure(format!(
                    "link {index} does not verify against its predecessor"
                ))
            })?;
        }

        last_key = Some(embedded_key(token.payload())?);
        terminal_payload = Some(token.into_payload());
    }

    debug!(trusted, links = links.len(), "certificate chain traversed");

    // Both are Some for any non-empty chain.
    match (terminal_payload, last_key) {
        (Some(payload), Some(key)) => Ok(ChainValidation {
            trusted,
            terminal_payload: payload,
            terminal_key: key,
        }),
        _ => Err(AuthError::MalformedChainLink {
            index: 0,
            reason: "chain is empty".into(),
        }),
    }
}

/// Extract the `identityPublicKey` claim a link hands to its successor.
fn embedded_key(payload: &Claims) -> Result<PublicKey> {
    let key_str = match payload.get("identityPublicKey") {
        Some(Value::String(s)) => s,
        _ => return Err(AuthError::MissingIdentityKey),
    };
    PublicKey::from_b64(key_str).map_err(|_| AuthError::MissingIdentityKey)
}
