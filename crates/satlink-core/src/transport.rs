//! Transport trait for modem communication.
//!
//! The [`Transport`] trait abstracts over the physical link to the modem.
//! Implementations exist for serial ports (`satlink-transport`) and mock
//! transports for testing (`satlink-test-harness`).
//!
//! The protocol engine in `satlink-protocol` operates on a `Transport`
//! rather than directly on a serial port, enabling both real hardware
//! control and deterministic unit testing.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to the modem.
///
/// The link is strictly half-duplex request/response: callers must never
/// start a new send while a response to a previous command is outstanding.
/// All methods take `&mut self`, so confining a transport to one session
/// enforces that serialization.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the modem.
    ///
    /// Implementations must write all bytes and flush before returning,
    /// so that the command is actually on the wire when the caller starts
    /// waiting for the response.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the modem into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Will wait up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Discard any unread input bytes.
    ///
    /// Called by the session immediately before transmitting a command so
    /// that stale bytes from a previous exchange are never interpreted as
    /// part of the next response.
    async fn discard_pending(&mut self) -> Result<()>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()` calls
    /// should return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
