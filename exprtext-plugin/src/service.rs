//! The request loop that answers the host.
//!
//! See [`PluginService`] for details.
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::transport::{self, Transport};
use crate::{
    Diagnostic, HostCapability, HostMessage, Invocation, InvocationError, MacroRef, MacroRegistry,
    PluginCapability, PluginConfig, PluginError, PluginMessage, Result, Syntax, SyntaxKind,
};

/// Protocol features this plugin supports, reported to the host in the capability exchange.
const FEATURES: &[&str] = &["expressionMacros"];

/// Answers one host connection: reads a frame, handles it, writes the reply, repeat.
///
/// Handling a message is synchronous and never touches the transport, so requests are processed
/// strictly in arrival order and each is answered before the next is read.
pub struct PluginService {
    config: PluginConfig,
    registry: MacroRegistry,

    /// Signal to stop serving.  Checked only between frames, so a reply is never cut short.
    cancellation_token: CancellationToken,
}

impl PluginService {
    pub fn new(config: PluginConfig, registry: MacroRegistry) -> Self {
        Self {
            config,
            registry,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Use the caller's cancellation token, so the caller can stop [`Self::serve`].
    pub fn with_cancellation_token(mut self, cancellation_token: CancellationToken) -> Self {
        self.cancellation_token = cancellation_token;
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Serve the host on `transport` until the host closes the connection or the cancellation
    /// token is triggered.
    ///
    /// Either of those is a clean shutdown.  An error means the transport itself failed, in which
    /// case there is no way to keep talking to the host.
    pub async fn serve(&self, mut transport: impl Transport) -> Result<()> {
        let remote_peer = transport.remote_peer();
        tracing::debug!(%remote_peer, "Serving host connection");

        loop {
            let frame = tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    tracing::debug!(%remote_peer, "Cancellation token triggered; stopping");
                    return Ok(());
                }
                frame = transport.receive_message() => frame.map_err(transport::boxed_error)?,
            };

            let Some(frame) = frame else {
                tracing::debug!(%remote_peer, "Host closed the connection");
                return Ok(());
            };

            let reply = self.handle_frame(&frame);
            let reply = serde_json::to_vec(&reply).map_err(|e| PluginError::SerMessage { source: e })?;

            transport::send(&mut transport, Bytes::from(reply)).await?;
        }
    }

    /// Decode one frame and produce the reply for it.
    pub fn handle_frame(&self, frame: &[u8]) -> PluginMessage {
        match serde_json::from_slice::<HostMessage>(frame) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(
                    frame_len = frame.len(),
                    error = %e,
                    "Host sent a frame that is not a valid message"
                );
                PluginMessage::InvalidMessage {
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn handle_message(&self, message: HostMessage) -> PluginMessage {
        match message {
            HostMessage::GetCapability { capability } => self.capability(capability),
            HostMessage::ExpandFreestandingMacro {
                macro_ref,
                discriminator,
                syntax,
            } => {
                let _span = tracing::debug_span!(
                    "expand",
                    name = %macro_ref.name,
                    %discriminator,
                    file = %syntax.location.file_name,
                    line = syntax.location.line,
                )
                .entered();

                match self
                    .expand(&macro_ref, &syntax)
                    .and_then(|expanded_source| self.fit_reply(PluginMessage::expanded(expanded_source)))
                {
                    Ok(reply) => {
                        tracing::debug!(?reply, "Expanded");
                        reply
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Expansion failed");
                        PluginMessage::expansion_failed(Diagnostic::error(e.to_string(), syntax.location))
                    }
                }
            }
        }
    }

    /// Reject a reply that the transport would refuse to send.  Outgoing frames share the
    /// incoming limit, and an expansion repeats its argument twice over with extra escaping.
    fn fit_reply(&self, reply: PluginMessage) -> Result<PluginMessage, InvocationError> {
        let size = serde_json::to_vec(&reply).map_or(0, |encoded| encoded.len());
        let max = self.config.max_message_bytes;

        if size > max {
            Err(InvocationError::ReplyTooLarge { size, max })
        } else {
            Ok(reply)
        }
    }

    fn capability(&self, host: HostCapability) -> PluginMessage {
        if host.protocol_version > self.config.protocol_version {
            tracing::info!(
                host_version = host.protocol_version,
                plugin_version = self.config.protocol_version,
                "Host speaks a newer protocol version; continuing with ours"
            );
        }

        PluginMessage::GetCapabilityResult {
            capability: PluginCapability {
                protocol_version: self.config.protocol_version,
                features: FEATURES.iter().map(|f| f.to_string()).collect(),
            },
        }
    }

    fn expand(&self, macro_ref: &MacroRef, syntax: &Syntax) -> Result<String, InvocationError> {
        let expression_macro =
            self.registry
                .get(&macro_ref.name)
                .ok_or_else(|| InvocationError::UnknownMacro {
                    name: macro_ref.name.clone(),
                    available: self.registry.describe(),
                })?;

        if syntax.kind != SyntaxKind::Expression {
            return Err(InvocationError::UnsupportedKind {
                name: macro_ref.name.clone(),
                kind: syntax.kind,
            });
        }

        let invocation = syntax.source.parse::<Invocation>()?;
        if invocation.name != macro_ref.name {
            tracing::debug!(
                spelled = %invocation.name,
                "Invocation spells the macro differently than the host's reference"
            );
        }

        let expansion = expression_macro.expand(invocation.arguments)?;

        Ok(expansion.to_source())
    }
}
