//! # FleetSync Multipart
//!
//! `multipart/form-data` decoding for FleetSync sync requests.
//!
//! This crate provides:
//! - A boundary-driven decoder producing named [`Part`]s
//! - Content-type helpers for multipart detection and boundary extraction
//! - Allocation limits for untrusted input
//!
//! This is a pure codec crate with no I/O operations.
//!
//! ## Decoding Rules
//!
//! - Part headers must be CRLF-terminated UTF-8
//! - The field name comes from the part's `Content-Disposition` header
//! - A body flagged as multipart that decodes to zero parts is an error
//! - Oversized parts and excessive part counts are rejected, never truncated

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod error;
mod part;

pub use decoder::{boundary_from_content_type, decode_form_data, is_multipart, MultipartDecoder};
pub use error::{MultipartError, MultipartResult};
pub use part::Part;
