//! # FleetSync Server
//!
//! Sync command layer for FleetSync operations endpoints.
//!
//! This crate provides:
//! - Multipart request parsing into typed sync requests
//! - The per-exchange parse → process → respond lifecycle ([`SyncCommand`])
//! - Response framing with connection-reuse policy
//! - Collaborator seams: processing pipeline, request verifier, telemetry
//!
//! # Architecture
//!
//! The surrounding HTTP transport owns sockets and status codes; this crate
//! owns the sync exchange contract. Each inbound exchange gets its own
//! [`SyncCommand`], never shared and never reused:
//!
//! ```rust,ignore
//! let ctx = CommandContext::new(config, verifier, processors, telemetry);
//!
//! // per exchange, on the transport's worker
//! let command = SyncCommand::new(ChannelType::OneShot);
//! let response = command.execute(&ctx, &inbound)?;
//! // transport writes response.header_pairs() and response.body()
//! ```
//!
//! # Errors
//!
//! The command layer never picks HTTP status codes. Errors carry a
//! client/server classification ([`CommandError::is_client_error`]) and the
//! transport maps them onto its wire.

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod channel;
mod command;
mod config;
mod error;
mod parser;
mod process;
mod response;
mod telemetry;
mod verify;

pub use channel::ChannelType;
pub use command::{CancelToken, CommandContext, CommandState, SyncCommand};
pub use config::ServerConfig;
pub use error::{CommandError, CommandResult};
pub use parser::{InboundRequest, MultipartRequestParser};
pub use process::{MockProcessor, ProcessedSync, ProcessingError, ProcessorSet, SyncProcessor};
pub use response::{ConnectionDirective, ResponseBuilder, TransportResponse, STATUS_OK};
pub use telemetry::{ExchangeTelemetry, TelemetrySink};
pub use verify::{AcceptAll, HmacVerifier, RequestVerifier, SecurityError};
