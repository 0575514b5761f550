//! Mock transport for deterministic testing of the protocol engine.
//!
//! [`MockTransport`] implements the [`Transport`] trait with pre-loaded
//! request/response pairs. This lets you test command encoding, line
//! framing, response decoding, and the boot-recovery resend without real
//! hardware.
//!
//! # Example
//!
//! ```
//! use satlink_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // Pre-load: when the engine sends this command, return this response.
//! mock.expect(b"get_datetime\r\n", b"API(600: \"2023-01-01T00:00:00Z\")\r\n");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use satlink_core::error::{Error, Result};
use satlink_core::transport::Transport;

/// A pre-loaded request/response pair for the mock transport.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be sent.
    request: Vec<u8>,
    /// The bytes staged as input when the matching request is received.
    response: Vec<u8>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Ordered queue of expected request/response pairs.
    expectations: VecDeque<Expectation>,
    /// Input bytes available to `receive()`.
    pending: VecDeque<u8>,
    /// Whether the transport is "connected".
    connected: bool,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
    /// How many times `discard_pending()` was called.
    discards: usize,
}

/// A mock [`Transport`] for testing the protocol engine without hardware.
///
/// Expectations are consumed in order. When `send()` is called, the sent
/// data is recorded and matched against the next expectation; the
/// corresponding response bytes become available to subsequent
/// `receive()` calls. When no input is pending, `receive()` returns
/// [`Error::Timeout`] immediately, so timeout paths run without real
/// delays.
///
/// Cloning is cheap and shares state: keep a clone before boxing the mock
/// into a session to inspect [`sent_data`](MockTransport::sent_data)
/// afterwards.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(Inner {
                connected: true,
                ..Inner::default()
            })),
        }
    }

    /// Add an expected request/response pair.
    ///
    /// When `send()` is called with data matching `request`, `response`
    /// is appended to the pending input. An empty `response` stages
    /// nothing, so the next `receive()` times out.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.inner.lock().unwrap().expectations.push_back(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Stage input bytes directly, without requiring a `send()` first.
    ///
    /// Useful for testing the line reader in isolation and for simulating
    /// unsolicited output.
    pub fn push_input(&mut self, data: &[u8]) {
        self.inner.lock().unwrap().pending.extend(data.iter().copied());
    }

    /// All data sent through this transport, one entry per `send()` call.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.inner.lock().unwrap().sent_log.clone()
    }

    /// The number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.inner.lock().unwrap().expectations.len()
    }

    /// The number of input bytes currently staged.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// How many times `discard_pending()` has been called.
    pub fn discard_count(&self) -> usize {
        self.inner.lock().unwrap().discards
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent `send()` and `receive()` calls
    /// return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.inner.lock().unwrap().connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        // Record what was sent.
        inner.sent_log.push(data.to_vec());

        // Match against the next expectation.
        if let Some(expectation) = inner.expectations.pop_front() {
            if data != expectation.request.as_slice() {
                return Err(Error::Transport(format!(
                    "unexpected send data: expected {:?}, got {:?}",
                    String::from_utf8_lossy(&expectation.request),
                    String::from_utf8_lossy(data),
                )));
            }
            inner.pending.extend(expectation.response.iter().copied());
            Ok(())
        } else {
            Err(Error::Transport(
                "no more expectations in mock transport".into(),
            ))
        }
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        if inner.pending.is_empty() {
            return Err(Error::Timeout);
        }
        let n = inner.pending.len().min(buf.len());
        for slot in buf.iter_mut().take(n) {
            *slot = inner.pending.pop_front().expect("length checked");
        }
        Ok(n)
    }

    async fn discard_pending(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(Error::NotConnected);
        }
        inner.discards += 1;
        inner.pending.clear();
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.connected = false;
        inner.pending.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn basic_send_receive() {
        let mut mock = MockTransport::new();
        mock.expect(b"get_firmware_version\r\n", b"API(600: \"1.2.3\")\r\n");

        mock.send(b"get_firmware_version\r\n").await.unwrap();

        let mut buf = [0u8; 64];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"API(600: \"1.2.3\")\r\n");
    }

    #[tokio::test]
    async fn tracks_sent_data() {
        let mut mock = MockTransport::new();
        mock.expect(b"a\r\n", b"API(600)\r\n");
        mock.expect(b"b\r\n", b"API(600)\r\n");

        mock.send(b"a\r\n").await.unwrap();
        mock.send(b"b\r\n").await.unwrap();

        assert_eq!(mock.sent_data(), vec![b"a\r\n".to_vec(), b"b\r\n".to_vec()]);
    }

    #[tokio::test]
    async fn wrong_data_errors() {
        let mut mock = MockTransport::new();
        mock.expect(b"expected\r\n", b"API(600)\r\n");

        let result = mock.send(b"something else\r\n").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn exhausted_expectations_error() {
        let mut mock = MockTransport::new();
        let result = mock.send(b"cmd\r\n").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn receive_without_input_times_out() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn partial_receive() {
        let mut mock = MockTransport::new();
        mock.push_input(b"abcd");

        let mut buf = [0u8; 2];
        let n = mock.receive(&mut buf, Duration::from_millis(10)).await.unwrap();
        assert_eq!(&buf[..n], b"ab");
        let n = mock.receive(&mut buf, Duration::from_millis(10)).await.unwrap();
        assert_eq!(&buf[..n], b"cd");
    }

    #[tokio::test]
    async fn discard_pending_clears_input() {
        let mut mock = MockTransport::new();
        mock.push_input(b"stale bytes");
        assert_eq!(mock.pending_len(), 11);

        mock.discard_pending().await.unwrap();
        assert_eq!(mock.pending_len(), 0);
        assert_eq!(mock.discard_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mut mock = MockTransport::new();
        let probe = mock.clone();
        mock.expect(b"cmd\r\n", b"API(600)\r\n");

        mock.send(b"cmd\r\n").await.unwrap();
        assert_eq!(probe.sent_data().len(), 1);
        assert_eq!(probe.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn disconnect() {
        let mut mock = MockTransport::new();
        assert!(mock.is_connected());

        mock.close().await.unwrap();
        assert!(!mock.is_connected());

        let result = mock.send(b"cmd\r\n").await;
        assert!(matches!(result, Err(Error::NotConnected)));

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }
}
