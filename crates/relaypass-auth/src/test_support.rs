//! Shared fixtures for unit tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{json, Value};

use relaypass_crypto::{sign_claims, Claims, KeyPair};

/// Canonical test identity.
pub const STEVE_UUID: &str = "f84c6a79-0a4e-45e7-9b83-0a42de72d64e";

pub fn object(value: Value) -> Claims {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

pub fn steve_extra_data() -> Value {
    json!({
        "displayName": "Steve",
        "identity": STEVE_UUID,
        "XUID": "2535405142550123",
    })
}

/// Build a chain of `len` links rooted at `anchor`. Link 0 is signed by the
/// anchor; each later link is signed by the key embedded in its
/// predecessor's payload. The terminal link carries Steve's `extraData`.
/// Returns the compact links and the key pair embedded in each.
pub fn build_chain(anchor: &KeyPair, len: usize) -> (Vec<String>, Vec<KeyPair>) {
    assert!(len > 0);
    let mut links = Vec::with_capacity(len);
    let mut keys: Vec<KeyPair> = Vec::with_capacity(len);

    for i in 0..len {
        let link_keys = KeyPair::generate();
        let mut payload = object(json!({
            "identityPublicKey": link_keys.public_key().to_b64(),
        }));
        if i == len - 1 {
            payload.insert("extraData".to_string(), steve_extra_data());
        }

        let signer = if i == 0 { anchor } else { &keys[i - 1] };
        let token = sign_claims(signer, &payload).unwrap();
        links.push(token.as_str().to_string());
        keys.push(link_keys);
    }

    (links, keys)
}

/// Skin claim map a client would submit alongside the chain.
pub fn skin_claims() -> Claims {
    object(json!({
        "SkinId": "Standard_Custom",
        "SkinData": URL_SAFE_NO_PAD.encode([0x7Fu8; 64]),
        "CapeData": "",
        "PremiumSkin": false,
    }))
}

/// Sign the standard skin claims with `identity_keys`.
pub fn skin_token(identity_keys: &KeyPair) -> String {
    sign_claims(identity_keys, &skin_claims())
        .unwrap()
        .as_str()
        .to_string()
}

/// Flip one signature byte of a compact token.
pub fn tamper_signature(link: &str) -> String {
    tamper_signature_at(link, 7, 0x01)
}

/// Flip `mask` into signature byte `byte % len` of a compact token.
pub fn tamper_signature_at(link: &str, byte: usize, mask: u8) -> String {
    let (input, sig_b64) = link.rsplit_once('.').unwrap();
    let mut sig = URL_SAFE_NO_PAD.decode(sig_b64).unwrap();
    let idx = byte % sig.len();
    sig[idx] ^= mask;
    format!("{input}.{}", URL_SAFE_NO_PAD.encode(&sig))
}
