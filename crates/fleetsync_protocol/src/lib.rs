//! # FleetSync Protocol
//!
//! Sync protocol types for FleetSync endpoints and servers.
//!
//! This crate provides:
//! - [`SyncRequest`] / [`SyncResponse`] per-exchange records
//! - Canonical multipart field names and response header constants
//! - Payload protocol negotiation ([`ProtocolNegotiator`])
//! - [`ProfileServerSync`] and its status enum for the response envelope
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fields;
mod negotiate;
mod profile;
mod request;

pub use negotiate::{ProtocolNegotiator, DEFAULT_PROTOCOL_ID};
pub use profile::{ProfileServerSync, SyncResponseStatus};
pub use request::{SyncRequest, SyncResponse};
