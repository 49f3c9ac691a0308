//! Transport abstraction
//!
//! The handshake logic is written against these traits so the reliable-UDP
//! stack and the packet codec stay out of this crate. Production wires them
//! to the real transport; tests substitute in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::login::{LoginMessage, PlayStatus};

/// Callback invoked for every steady-state packet after handoff. The
/// argument is the raw packet body; the hook forwards it to the other leg.
pub type ForwardingHook = Box<dyn Fn(&[u8]) + Send + Sync>;

/// The client-facing connection.
#[async_trait]
pub trait UpstreamSession: Send + Sync {
    /// Pin the packet codec to a protocol version.
    fn set_codec_version(&self, version: i32);

    /// Send a play status code.
    async fn send_status(&self, status: PlayStatus) -> Result<()>;

    /// Disconnect with a reason shown to the client.
    async fn disconnect(&self, reason: &str);

    /// Route every further inbound packet through `hook`.
    fn install_forwarding(&self, hook: ForwardingHook);

    /// Toggle per-packet diagnostic logging.
    fn set_diagnostic_logging(&self, enabled: bool);

    /// Whether the client has already gone away.
    fn is_closed(&self) -> bool;

    /// Send a raw packet to the client.
    fn send_raw(&self, packet: &[u8]);
}

/// Opens connections to the downstream server.
#[async_trait]
pub trait DownstreamConnector: Send + Sync {
    /// Session type produced on success
    type Session: DownstreamSession + 'static;

    /// Connect to `address`.
    async fn connect(&self, address: &str) -> Result<Arc<Self::Session>>;
}

/// The server-facing connection.
#[async_trait]
pub trait DownstreamSession: Send + Sync {
    /// Send the forged login message.
    async fn send_login(&self, login: &LoginMessage) -> Result<()>;

    /// Route every further inbound packet through `hook`.
    fn install_forwarding(&self, hook: ForwardingHook);

    /// Close the connection.
    async fn disconnect(&self);

    /// Send a raw packet to the server.
    fn send_raw(&self, packet: &[u8]);
}
