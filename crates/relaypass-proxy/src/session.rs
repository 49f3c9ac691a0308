//! Handshake orchestration
//!
//! Drives a single client session from the first login message through
//! validation, credential forging and downstream connection, ending in
//! steady-state forwarding. States advance monotonically; a failed session
//! is never resumed.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use relaypass_auth::{
    authority_key, extract_identity, forge_chain, forge_identity_token, forge_skin_token,
    validate_chain, verify_skin, IdentityClaims, SkinPayload,
};
use relaypass_crypto::{KeyPair, PublicKey};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::login::{CertificateDocument, LoginMessage, VersionCheck};
use crate::transport::{DownstreamConnector, DownstreamSession, UpstreamSession};
use crate::{DISCONNECT_DOWNSTREAM_UNREACHABLE, DISCONNECT_LOGIN_FAILED, SUPPORTED_PROTOCOL_VERSION};

/// Session lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// Waiting for the client's login message
    AwaitingLogin,
    /// Certificate chain traversal in progress
    ChainValidating,
    /// Identity and skin claims verified and extracted
    ClaimsExtracted,
    /// Downstream connection in progress
    ConnectingDownstream,
    /// Replacement credentials built and signed
    CredentialsForged,
    /// Both legs wired together, handshake complete
    HandedOff,
    /// Session terminated during the handshake
    Failed,
}

/// Everything the downstream leg needs once validation has passed.
struct ForgeBundle {
    claims: IdentityClaims,
    skin: SkinPayload,
    chain: Vec<String>,
    protocol_version: i32,
}

/// One client session's handshake.
pub struct HandshakeSession<U, C> {
    upstream: Arc<U>,
    connector: Arc<C>,
    config: ProxyConfig,
    anchor: PublicKey,
    state: Arc<RwLock<HandshakeState>>,
    downstream_task: Option<JoinHandle<()>>,
}

impl<U, C> HandshakeSession<U, C>
where
    U: UpstreamSession + 'static,
    C: DownstreamConnector + 'static,
{
    /// Create a session trusting the built-in authority key.
    pub fn new(upstream: Arc<U>, connector: Arc<C>, config: ProxyConfig) -> Self {
        Self::with_anchor(upstream, connector, config, authority_key().clone())
    }

    /// Create a session trusting `anchor` instead of the built-in authority.
    pub fn with_anchor(
        upstream: Arc<U>,
        connector: Arc<C>,
        config: ProxyConfig,
        anchor: PublicKey,
    ) -> Self {
        Self {
            upstream,
            connector,
            config,
            anchor,
            state: Arc::new(RwLock::new(HandshakeState::AwaitingLogin)),
            downstream_task: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandshakeState {
        *self.state.read()
    }

    /// Process the client's login message. On success the downstream leg
    /// continues in the background; await [`Self::settled`] to observe the
    /// final state.
    #[instrument(skip_all, fields(protocol_version = login.protocol_version))]
    pub async fn handle_login(&mut self, login: LoginMessage) -> Result<()> {
        match self.drive_login(login).await {
            Ok(()) => Ok(()),
            Err(err) => {
                *self.state.write() = HandshakeState::Failed;
                warn!(error = %err, "login handshake failed");
                // An unsupported version has already been answered with a
                // status code and disconnect.
                if !matches!(err, ProxyError::UnsupportedProtocol { .. }) {
                    self.upstream.disconnect(DISCONNECT_LOGIN_FAILED).await;
                }
                Err(err)
            }
        }
    }

    async fn drive_login(&mut self, login: LoginMessage) -> Result<()> {
        let classification =
            VersionCheck::classify(login.protocol_version, SUPPORTED_PROTOCOL_VERSION);
        if let Some(status) = classification.rejection_status() {
            self.upstream.send_status(status).await?;
            self.upstream.disconnect(DISCONNECT_LOGIN_FAILED).await;
            return Err(ProxyError::UnsupportedProtocol {
                declared: login.protocol_version,
                supported: SUPPORTED_PROTOCOL_VERSION,
                classification,
            });
        }
        self.upstream.set_codec_version(SUPPORTED_PROTOCOL_VERSION);

        *self.state.write() = HandshakeState::ChainValidating;
        let document = CertificateDocument::parse(&login.chain_data)?;
        let validation = validate_chain(&document.chain, &self.anchor)
            .and_then(|v| v.require_trusted())
            .map_err(ProxyError::Auth)?;
        let identity = extract_identity(&validation.terminal_payload).map_err(ProxyError::Auth)?;

        let skin_raw = std::str::from_utf8(&login.skin_data)
            .map_err(|e| ProxyError::Serialization(format!("skin token is not UTF-8: {e}")))?;
        let skin = verify_skin(skin_raw, &identity.public_key).map_err(ProxyError::Auth)?;
        *self.state.write() = HandshakeState::ClaimsExtracted;

        info!(
            display_name = %identity.claims.display_name,
            xuid = %identity.claims.xuid,
            "client credentials verified"
        );

        let bundle = ForgeBundle {
            claims: identity.claims,
            skin,
            chain: document.chain,
            protocol_version: login.protocol_version,
        };

        *self.state.write() = HandshakeState::ConnectingDownstream;
        let upstream = Arc::clone(&self.upstream);
        let connector = Arc::clone(&self.connector);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        self.downstream_task = Some(tokio::spawn(async move {
            Self::drive_downstream(upstream, connector, state, config, bundle).await;
        }));
        Ok(())
    }

    async fn drive_downstream(
        upstream: Arc<U>,
        connector: Arc<C>,
        state: Arc<RwLock<HandshakeState>>,
        config: ProxyConfig,
        bundle: ForgeBundle,
    ) {
        let target = config.target_address.as_str();
        let downstream = match connector.connect(target).await {
            Ok(session) => session,
            Err(err) => {
                warn!(%target, error = %err, "downstream connection failed");
                *state.write() = HandshakeState::Failed;
                upstream.disconnect(DISCONNECT_DOWNSTREAM_UNREACHABLE).await;
                return;
            }
        };
        debug!(%target, "downstream connected");

        // The client may have gone away while the connection was pending.
        if upstream.is_closed() {
            debug!("client left before downstream connect completed");
            *state.write() = HandshakeState::Failed;
            downstream.disconnect().await;
            return;
        }

        let login = match Self::forge_login(&bundle) {
            Ok(login) => login,
            Err(err) => {
                warn!(error = %err, "credential forging failed");
                *state.write() = HandshakeState::Failed;
                downstream.disconnect().await;
                upstream.disconnect(DISCONNECT_LOGIN_FAILED).await;
                return;
            }
        };
        *state.write() = HandshakeState::CredentialsForged;

        if let Err(err) = downstream.send_login(&login).await {
            warn!(error = %err, "forged login rejected by transport");
            *state.write() = HandshakeState::Failed;
            downstream.disconnect().await;
            upstream.disconnect(DISCONNECT_DOWNSTREAM_UNREACHABLE).await;
            return;
        }

        let to_server = Arc::clone(&downstream);
        upstream.install_forwarding(Box::new(move |packet| to_server.send_raw(packet)));
        let to_client = Arc::clone(&upstream);
        downstream.install_forwarding(Box::new(move |packet| to_client.send_raw(packet)));
        upstream.set_diagnostic_logging(!config.passthrough_packets);

        *state.write() = HandshakeState::HandedOff;
        info!("session handed off to steady-state forwarding");
    }

    fn forge_login(bundle: &ForgeBundle) -> Result<LoginMessage> {
        let relay_keys = KeyPair::generate();
        let terminal =
            forge_identity_token(&relay_keys, &bundle.claims).map_err(ProxyError::Auth)?;
        let skin = forge_skin_token(&relay_keys, &bundle.skin).map_err(ProxyError::Auth)?;
        let document = CertificateDocument {
            chain: forge_chain(&bundle.chain, terminal),
        };
        Ok(LoginMessage {
            protocol_version: bundle.protocol_version,
            chain_data: document.to_bytes()?,
            skin_data: skin.into(),
        })
    }

    /// Wait for the background downstream leg to finish, in whichever state
    /// it lands.
    pub async fn settled(&mut self) {
        if let Some(task) = self.downstream_task.take() {
            let _ = task.await;
        }
    }
}
