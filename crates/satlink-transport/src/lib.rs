//! Transport implementations for satlink.
//!
//! This crate provides the concrete implementation of the
//! [`Transport`](satlink_core::Transport) trait for serial links:
//!
//! - [`SerialTransport`]: USB virtual COM ports and RS-232 connections
//!   to the modem or its development kit.
//!
//! Deterministic testing uses `MockTransport` from `satlink-test-harness`
//! instead.

pub mod serial;

pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
