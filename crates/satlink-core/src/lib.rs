//! satlink-core: Core traits, types, and error definitions for satlink.
//!
//! This crate defines the transport-agnostic abstractions that the satlink
//! protocol engine and modem driver build on. Applications depend on these
//! types without pulling in any concrete transport.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`StatusCode`] -- 3-digit response codes with category/type split
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod status;
pub mod transport;

// Re-export key types at crate root for ergonomic `use satlink_core::*`.
pub use error::{DecodeError, Error, Result};
pub use status::{CodeCategory, CodeType, StatusCode};
pub use transport::Transport;
