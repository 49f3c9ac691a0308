//! # RelayPass Proxy
//!
//! The login-handshake stage of a transparent relay that sits between a
//! game client and a game server. The relay verifies the client's
//! certificate chain exactly as the real server would, extracts the proven
//! identity and skin claims, forges replacement credentials under its own
//! keys, and hands the session off to steady-state packet forwarding.
//!
//! The packet codec, reliable-UDP transport and post-handshake relay live
//! behind the traits in [`transport`]; this crate drives them.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod login;
pub mod session;
pub mod transport;

pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use login::{CertificateDocument, LoginMessage, PlayStatus, VersionCheck};
pub use session::{HandshakeSession, HandshakeState};
pub use transport::{DownstreamConnector, DownstreamSession, ForwardingHook, UpstreamSession};

/// The single protocol version the relay speaks on both legs.
pub const SUPPORTED_PROTOCOL_VERSION: i32 = 332;

/// Disconnect reason shown to the client when the handshake fails. A
/// localization token resolved client-side.
pub const DISCONNECT_LOGIN_FAILED: &str = "disconnectionScreen.internalError.cantConnect";

/// Disconnect reason when the downstream server cannot be reached.
pub const DISCONNECT_DOWNSTREAM_UNREACHABLE: &str = "Unable to connect to downstream server";
