//! Session controller: one full command/response round trip.
//!
//! A [`Session`] owns the transport exclusively and serializes all
//! exchanges over it. The protocol is strictly half-duplex, so there is
//! never more than one outstanding command; callers needing concurrent
//! access must share a single session behind a mutex or confine it to one
//! task.
//!
//! The controller also implements the boot-recovery rule: when a read
//! decodes as the modem's boot banner, the last command is retransmitted
//! verbatim and the response read again. By default this happens exactly
//! once per round trip; a boot signal that survives the retry is returned
//! to the caller as-is.

use std::time::Duration;

use tracing::debug;

use satlink_core::error::Result;
use satlink_core::status::StatusCode;
use satlink_core::transport::Transport;

use crate::command::Command;
use crate::decode::{decode_with_banner, Decoded, DEFAULT_BANNER_MARKER};
use crate::line::{read_line, DEFAULT_READ_TIMEOUT};

/// Configuration for a [`Session`].
///
/// The boot-banner marker and retry count are configurable because both
/// have varied across modem firmware revisions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Deadline for reading one response line (default 7000 ms).
    pub read_timeout: Duration,
    /// How many times to resend the last command after a boot banner
    /// (default 1).
    pub boot_retries: u32,
    /// Substring identifying the boot banner.
    pub banner_marker: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            read_timeout: DEFAULT_READ_TIMEOUT,
            boot_retries: 1,
            banner_marker: DEFAULT_BANNER_MARKER.to_string(),
        }
    }
}

/// A command/response session with the modem.
///
/// Tracks the last command sent and the most recent raw and decoded
/// response for introspection; this state is purely diagnostic apart from
/// the last command, which drives the boot-recovery resend.
pub struct Session {
    transport: Box<dyn Transport>,
    config: SessionConfig,
    last_command: Option<Vec<u8>>,
    last_response: Option<String>,
    last_code: Option<StatusCode>,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(transport: Box<dyn Transport>, config: SessionConfig) -> Self {
        Session {
            transport,
            config,
            last_command: None,
            last_response: None,
            last_code: None,
        }
    }

    /// Send a command and read, decode, and return its response.
    ///
    /// Pending input is drained before the write so stale bytes from a
    /// previous exchange cannot be mistaken for this command's response.
    /// At most `max_args` response arguments are decoded.
    pub async fn send_and_receive(&mut self, command: Command, max_args: usize) -> Result<Decoded> {
        let wire = command.into_bytes();
        debug!(command = %String::from_utf8_lossy(&wire).trim_end(), "sending command");

        self.transport.discard_pending().await?;
        self.transport.send(&wire).await?;
        self.last_command = Some(wire);

        self.read_reply(max_args).await
    }

    /// Write raw bytes to the transport without recording them as a
    /// command. Used for payload data that follows a `set_payload`
    /// exchange.
    pub async fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.transport.send(data).await
    }

    /// Read one response line, decode it, and apply boot recovery.
    ///
    /// Normally invoked through [`send_and_receive`](Session::send_and_receive);
    /// exposed for flows that expect an extra response after raw data
    /// (payload upload).
    pub async fn read_reply(&mut self, max_args: usize) -> Result<Decoded> {
        let mut result = self.read_and_decode(max_args).await;

        let mut attempt = 0;
        while attempt < self.config.boot_retries && matches!(result, Ok(Decoded::Booted(_))) {
            let Some(wire) = self.last_command.clone() else {
                break;
            };
            attempt += 1;
            debug!(attempt, "modem just booted, resending last command");
            self.transport.discard_pending().await?;
            self.transport.send(&wire).await?;
            result = self.read_and_decode(max_args).await;
        }

        result
    }

    async fn read_and_decode(&mut self, max_args: usize) -> Result<Decoded> {
        let raw = read_line(self.transport.as_mut(), self.config.read_timeout).await?;

        // A timed-out read decodes as an empty line (invalid by
        // construction); its partial text is kept only for diagnostics.
        let line = if raw.is_complete() { raw.text() } else { "" };
        let result = decode_with_banner(line, max_args, &self.config.banner_marker);

        self.last_code = Some(match &result {
            Ok(decoded) => decoded.status_code(),
            Err(e) => e.status_code(),
        });
        self.last_response = Some(raw.text().to_string());
        debug!(code = %self.last_code.unwrap(), raw = ?raw.text(), "response decoded");

        result.map_err(Into::into)
    }

    /// The raw text of the most recently read line, complete or partial.
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    /// The status code of the most recent decode outcome, including the
    /// reserved local codes for decode failures and the boot banner.
    pub fn last_code(&self) -> Option<StatusCode> {
        self.last_code
    }

    /// Whether the underlying transport is connected.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Close the underlying transport.
    pub async fn close(&mut self) -> Result<()> {
        self.transport.close().await
    }

    /// Tear down the session and recover the transport.
    pub fn into_transport(self) -> Box<dyn Transport> {
        self.transport
    }
}
