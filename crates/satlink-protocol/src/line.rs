//! Line framing: reading one CRLF-terminated line from a transport.
//!
//! The modem terminates every response with `\r\n`. This module pulls
//! bytes from a [`Transport`] one at a time until the CRLF pair is seen or
//! a deadline elapses. The deadline is measured from the start of the read
//! attempt, not from the last received byte.

use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tokio::time::Instant;
use tracing::warn;

use satlink_core::error::{Error, Result};
use satlink_core::transport::Transport;

/// Default idle timeout for one line read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(7000);

/// Maximum accumulated line length before the buffer is reset.
/// Responses are typically well under 200 bytes; this is headroom against
/// a noisy or misconfigured link streaming garbage without a terminator.
const MAX_LINE: usize = 1024;

/// One logical input line, or what was collected before the deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    /// A CRLF-terminated line. The terminator pair is excluded.
    Complete(String),

    /// The deadline elapsed before a terminator was seen. Carries any
    /// partial content accumulated so far; callers treat this as an
    /// empty/invalid line and keep the text only for diagnostics.
    TimedOut(String),
}

impl RawLine {
    /// The collected text, complete or partial.
    pub fn text(&self) -> &str {
        match self {
            RawLine::Complete(s) | RawLine::TimedOut(s) => s,
        }
    }

    /// Whether a terminator was seen.
    pub fn is_complete(&self) -> bool {
        matches!(self, RawLine::Complete(_))
    }
}

/// Read one logical line from the transport.
///
/// Blocks (asynchronously) until a CRLF pair arrives or `timeout` elapses.
/// A carriage return is never part of the output: paired with a line feed
/// it terminates the line, unpaired it is silently dropped. All other
/// bytes are appended verbatim.
pub async fn read_line(transport: &mut dyn Transport, timeout: Duration) -> Result<RawLine> {
    let deadline = Instant::now() + timeout;
    let mut acc = BytesMut::new();
    let mut prev = 0u8;
    let mut byte = [0u8; 1];

    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(RawLine::TimedOut(lossy(&acc)));
        }

        match transport.receive(&mut byte, deadline - now).await {
            // A zero-byte read from a serial device means the far end
            // closed; retrying would spin until the deadline.
            Ok(0) => return Err(Error::ConnectionLost),
            Ok(_) => {
                let cur = byte[0];
                if prev == b'\r' && cur == b'\n' {
                    return Ok(RawLine::Complete(lossy(&acc)));
                }
                if cur != b'\r' {
                    acc.put_u8(cur);
                }
                if acc.len() > MAX_LINE {
                    warn!(len = acc.len(), "line buffer overflow, resetting");
                    acc.clear();
                }
                prev = cur;
            }
            Err(Error::Timeout) => {
                return Ok(RawLine::TimedOut(lossy(&acc)));
            }
            Err(e) => return Err(e),
        }
    }
}

fn lossy(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use satlink_test_harness::MockTransport;

    /// Stage `response` as pending input without going through `send()`.
    fn preloaded(response: &[u8]) -> MockTransport {
        let mut mock = MockTransport::new();
        mock.push_input(response);
        mock
    }

    #[tokio::test]
    async fn reads_one_crlf_terminated_line() {
        let mut mock = preloaded(b"API(600)\r\n");
        let line = read_line(&mut mock, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(line, RawLine::Complete("API(600)".into()));
    }

    #[tokio::test]
    async fn bare_carriage_return_is_dropped() {
        // The CR before "mid" is not part of a CRLF pair: it neither
        // terminates the line nor appears in the output.
        let mut mock = preloaded(b"abc\rmid\r\n");
        let line = read_line(&mut mock, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(line, RawLine::Complete("abcmid".into()));
    }

    #[tokio::test]
    async fn bare_line_feed_is_kept() {
        let mut mock = preloaded(b"a\nb\r\n");
        let line = read_line(&mut mock, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(line, RawLine::Complete("a\nb".into()));
    }

    #[tokio::test]
    async fn timeout_returns_partial_content() {
        // No terminator: the mock signals timeout once its bytes run out.
        let mut mock = preloaded(b"API(60");
        let line = read_line(&mut mock, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(line, RawLine::TimedOut("API(60".into()));
        assert!(!line.is_complete());
    }

    #[tokio::test]
    async fn timeout_with_no_data_returns_empty() {
        let mut mock = MockTransport::new();
        let line = read_line(&mut mock, Duration::from_millis(50))
            .await
            .unwrap();
        assert_eq!(line, RawLine::TimedOut(String::new()));
    }

    /// A transport whose reads always return zero bytes, as a serial
    /// driver does once the device is unplugged.
    struct ClosedPort;

    #[async_trait::async_trait]
    impl Transport for ClosedPort {
        async fn send(&mut self, _data: &[u8]) -> Result<()> {
            Ok(())
        }

        async fn receive(&mut self, _buf: &mut [u8], _timeout: Duration) -> Result<usize> {
            Ok(0)
        }

        async fn discard_pending(&mut self) -> Result<()> {
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            Ok(())
        }

        fn is_connected(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn zero_byte_read_is_connection_lost() {
        let mut port = ClosedPort;
        let result = read_line(&mut port, Duration::from_secs(7)).await;
        assert!(matches!(result, Err(Error::ConnectionLost)));
    }

    #[tokio::test]
    async fn stops_at_first_terminator() {
        let mut mock = preloaded(b"first\r\nsecond\r\n");
        let line = read_line(&mut mock, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(line, RawLine::Complete("first".into()));
    }
}
