//! Per-exchange sync command lifecycle.

use crate::channel::ChannelType;
use crate::config::ServerConfig;
use crate::error::{CommandError, CommandResult};
use crate::parser::{InboundRequest, MultipartRequestParser};
use crate::process::ProcessorSet;
use crate::response::{ResponseBuilder, TransportResponse};
use crate::telemetry::TelemetrySink;
use crate::verify::RequestVerifier;
use fleetsync_protocol::{ProtocolNegotiator, SyncRequest, SyncResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Lifecycle state of a [`SyncCommand`].
///
/// Transitions are linear: `Created → Parsed → Processed → Responded`.
/// There are no retries and no re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    /// Bound to an exchange; nothing decoded yet.
    Created,
    /// Request decoded and protocol resolved.
    Parsed,
    /// Pipeline produced a response body.
    Processed,
    /// Response handed to the transport; the command is spent.
    Responded,
}

/// Cancellation handle for an in-flight exchange.
///
/// The transport clones the token before parking the command on a worker;
/// tripping it makes the RESPOND transition abort instead of building a
/// response.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true if the token has been tripped.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared collaborators for command execution.
///
/// Built once at startup; read-only afterwards and shared by every
/// concurrent exchange.
pub struct CommandContext {
    config: ServerConfig,
    negotiator: ProtocolNegotiator,
    parser: MultipartRequestParser,
    verifier: Arc<dyn RequestVerifier>,
    processors: ProcessorSet,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CommandContext {
    /// Creates a context from configuration and collaborator handles.
    pub fn new(
        config: ServerConfig,
        verifier: Arc<dyn RequestVerifier>,
        processors: ProcessorSet,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let negotiator = ProtocolNegotiator::new(config.default_protocol.clone());
        let parser = MultipartRequestParser::new(&config);
        Self {
            config,
            negotiator,
            parser,
            verifier,
            processors,
            telemetry,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// One request/response exchange moving through parse → process → respond.
///
/// A command is bound to a single exchange and never reused; all mutable
/// state is uniquely owned and touched only through `&mut self`, so no
/// locking is needed anywhere in the lifecycle.
pub struct SyncCommand {
    exchange_id: Uuid,
    channel: ChannelType,
    state: CommandState,
    cancel: CancelToken,
    request: Option<SyncRequest>,
    protocol: Option<String>,
    response: Option<SyncResponse>,
    sync_time: Option<Duration>,
}

impl SyncCommand {
    /// Creates a command for one inbound exchange on the given channel.
    pub fn new(channel: ChannelType) -> Self {
        Self {
            exchange_id: Uuid::new_v4(),
            channel,
            state: CommandState::Created,
            cancel: CancelToken::new(),
            request: None,
            protocol: None,
            response: None,
            sync_time: None,
        }
    }

    /// Unique id of this exchange, for log correlation.
    pub fn exchange_id(&self) -> Uuid {
        self.exchange_id
    }

    /// Channel the exchange arrived on.
    pub fn channel(&self) -> ChannelType {
        self.channel
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Returns a cancellation handle for the transport to keep.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The parsed request, once PARSE has completed.
    pub fn request(&self) -> Option<&SyncRequest> {
        self.request.as_ref()
    }

    /// The negotiated payload protocol, once PARSE has completed.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Wall-clock duration of the processing step, once PROCESS has run.
    pub fn sync_time(&self) -> Option<Duration> {
        self.sync_time
    }

    fn expect_state(&self, expected: CommandState, to: CommandState) -> CommandResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CommandError::InvalidState {
                from: self.state,
                to,
            })
        }
    }

    /// PARSE: decodes the inbound request and resolves the payload protocol.
    ///
    /// On failure the command aborts in place; the transport maps the error
    /// to its own client-error response.
    pub fn parse(&mut self, ctx: &CommandContext, inbound: &InboundRequest) -> CommandResult<()> {
        self.expect_state(CommandState::Created, CommandState::Parsed)?;
        let request = ctx.parser.parse(inbound).map_err(|e| {
            tracing::error!(exchange = %self.exchange_id, error = %e, "request parse failed");
            e
        })?;
        let protocol = ctx
            .negotiator
            .resolve(request.requested_protocol.as_deref())
            .to_string();
        tracing::debug!(
            exchange = %self.exchange_id,
            protocol = %protocol,
            payload_len = request.payload.len(),
            signed = request.is_signed(),
            "request parsed"
        );
        self.request = Some(request);
        self.protocol = Some(protocol);
        self.state = CommandState::Parsed;
        Ok(())
    }

    /// PROCESS: verifies the request, then delegates to the channel's
    /// processing strategy, timing the call.
    ///
    /// The elapsed duration is reported to the telemetry sink whether the
    /// pipeline succeeded or not.
    pub fn process(&mut self, ctx: &CommandContext) -> CommandResult<()> {
        self.expect_state(CommandState::Parsed, CommandState::Processed)?;
        let (Some(request), Some(protocol)) = (self.request.as_ref(), self.protocol.as_deref())
        else {
            return Err(CommandError::InvalidState {
                from: self.state,
                to: CommandState::Processed,
            });
        };

        ctx.verifier.verify(request).map_err(|e| {
            tracing::error!(exchange = %self.exchange_id, error = %e, "request verification failed");
            CommandError::from(e)
        })?;

        let started = Instant::now();
        let result = ctx
            .processors
            .for_channel(self.channel)
            .process(request, protocol);
        let elapsed = started.elapsed();
        ctx.telemetry.record_sync_time(elapsed);

        match result {
            Ok(processed) => {
                tracing::debug!(
                    exchange = %self.exchange_id,
                    status = ?processed.profile.response_status(),
                    body_len = processed.response.len(),
                    elapsed_us = elapsed.as_micros() as u64,
                    "sync processed"
                );
                self.sync_time = Some(elapsed);
                self.response = Some(processed.response);
                self.state = CommandState::Processed;
                Ok(())
            }
            Err(e) => {
                tracing::error!(exchange = %self.exchange_id, error = %e, "sync processing failed");
                self.sync_time = Some(elapsed);
                Err(e.into())
            }
        }
    }

    /// RESPOND: builds the transport response and retires the command.
    ///
    /// A cancelled exchange aborts here without building a response; the
    /// request and response buffers drop with the command.
    pub fn respond(&mut self, keep_alive_requested: bool) -> CommandResult<TransportResponse> {
        self.expect_state(CommandState::Processed, CommandState::Responded)?;
        if self.cancel.is_cancelled() {
            self.request = None;
            self.response = None;
            tracing::debug!(exchange = %self.exchange_id, "exchange cancelled before respond");
            return Err(CommandError::Cancelled);
        }
        let Some(envelope) = self.response.take() else {
            return Err(CommandError::InvalidState {
                from: self.state,
                to: CommandState::Responded,
            });
        };
        self.state = CommandState::Responded;
        let response =
            ResponseBuilder::build(envelope.body, keep_alive_requested, self.channel.forces_close());
        tracing::debug!(
            exchange = %self.exchange_id,
            connection = response.connection().as_str(),
            content_length = response.content_length(),
            "response built"
        );
        Ok(response)
    }

    /// Drives the full parse → process → respond cycle for one request.
    ///
    /// Consumes the command: one instance, one exchange.
    pub fn execute(
        mut self,
        ctx: &CommandContext,
        inbound: &InboundRequest,
    ) -> CommandResult<TransportResponse> {
        self.parse(ctx, inbound)?;
        self.process(ctx)?;
        self.respond(inbound.keep_alive)
    }
}
