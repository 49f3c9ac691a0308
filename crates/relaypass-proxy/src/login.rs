//! Login message model
//!
//! The first message of a session carries the declared protocol version and
//! two opaque byte regions: the certificate chain document and the signed
//! skin token. Both regions are kept as raw bytes until the version check
//! passes; nothing else is decoded before then.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ProxyError, Result};

/// The login message as decoded off the wire.
#[derive(Clone, Debug)]
pub struct LoginMessage {
    /// Protocol version the client declared
    pub protocol_version: i32,
    /// Raw certificate chain document (JSON)
    pub chain_data: Bytes,
    /// Raw signed skin token (compact form)
    pub skin_data: Bytes,
}

/// The certificate document wrapping the chain: a JSON object whose `chain`
/// member is an ordered array of serialized signed tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CertificateDocument {
    /// Chain links, anchor-rooted first, client terminal last
    pub chain: Vec<String>,
}

impl CertificateDocument {
    /// Parse a certificate document from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| ProxyError::InvalidCertificateFormat(e.to_string()))?;
        let chain = value
            .get("chain")
            .ok_or_else(|| {
                ProxyError::InvalidCertificateFormat("missing chain member".to_string())
            })?
            .as_array()
            .ok_or_else(|| {
                ProxyError::InvalidCertificateFormat("chain is not an array".to_string())
            })?;

        let mut links = Vec::with_capacity(chain.len());
        for (index, entry) in chain.iter().enumerate() {
            match entry.as_str() {
                Some(link) => links.push(link.to_string()),
                None => {
                    return Err(ProxyError::InvalidCertificateFormat(format!(
                        "chain entry {index} is not a string"
                    )))
                }
            }
        }
        if links.is_empty() {
            return Err(ProxyError::InvalidCertificateFormat(
                "chain is empty".to_string(),
            ));
        }
        Ok(Self { chain: links })
    }

    /// Serialize back to the wire form.
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

/// Play status codes the relay may send during the handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayStatus {
    /// Login accepted
    LoginSuccess,
    /// Client is older than the supported version
    FailedClient,
    /// Server is older than the client's version
    FailedServer,
}

/// Outcome of comparing the declared protocol version against the pinned one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionCheck {
    /// Versions match
    Compatible,
    /// Peer declared a newer version than the relay supports
    PeerTooNew,
    /// Peer declared an older version than the relay supports
    PeerTooOld,
}

impl VersionCheck {
    /// Classify `declared` against `supported`.
    pub fn classify(declared: i32, supported: i32) -> Self {
        match declared.cmp(&supported) {
            std::cmp::Ordering::Greater => VersionCheck::PeerTooNew,
            std::cmp::Ordering::Less => VersionCheck::PeerTooOld,
            std::cmp::Ordering::Equal => VersionCheck::Compatible,
        }
    }

    /// The rejection status to send for an incompatible peer. A too-new
    /// client is told the server is out of date; a too-old client is told
    /// to update itself.
    pub fn rejection_status(self) -> Option<PlayStatus> {
        match self {
            VersionCheck::Compatible => None,
            VersionCheck::PeerTooNew => Some(PlayStatus::FailedServer),
            VersionCheck::PeerTooOld => Some(PlayStatus::FailedClient),
        }
    }
}
