//! satlink-test-harness: Test utilities for the satlink protocol engine.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! command encoding, line framing, response decoding, and session behavior
//! without requiring real modem hardware.

pub mod mock_serial;

pub use mock_serial::MockTransport;
