//! Credential forging
//!
//! Builds the replacement identity and skin tokens the relay presents on
//! its downstream leg. The forged terminal link is self-consistent: it is
//! signed by the same relay key pair whose public key it embeds, since the
//! relay, not the original client device, is the credential holder from
//! here on. Original claims are re-embedded verbatim.

use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::debug;

use relaypass_crypto::{sign_claims, Claims, KeyPair};

use crate::error::Result;
use crate::identity::IdentityClaims;
use crate::skin::SkinPayload;

/// Validity window of a forged identity token, in hours.
const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Build the forged terminal chain link for `claims`, signed by `keys`.
pub fn forge_identity_token(keys: &KeyPair, claims: &IdentityClaims) -> Result<String> {
    let now = Utc::now();
    let mut payload = Claims::new();
    payload.insert(
        "nbf".to_string(),
        Value::from((now - Duration::minutes(1)).timestamp()),
    );
    payload.insert(
        "exp".to_string(),
        Value::from((now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp()),
    );
    payload.insert(
        "extraData".to_string(),
        Value::Object(claims.extra_data().clone()),
    );
    payload.insert(
        "identityPublicKey".to_string(),
        Value::String(keys.public_key().to_b64()),
    );

    let token = sign_claims(keys, &payload)?;
    debug!(display_name = %claims.display_name, "forged identity token");
    Ok(token.as_str().to_string())
}

/// Re-sign the verified skin payload with the relay key.
pub fn forge_skin_token(keys: &KeyPair, skin: &SkinPayload) -> Result<String> {
    let token = sign_claims(keys, skin.claims())?;
    Ok(token.as_str().to_string())
}

/// Replace the terminal link of `chain` with `forged_terminal`, leaving the
/// anchor-rooted prefix untouched for the downstream server to re-verify.
pub fn forge_chain(chain: &[String], forged_terminal: String) -> Vec<String> {
    let mut links: Vec<String> = chain.to_vec();
    links.pop();
    links.push(forged_terminal);
    links
}
