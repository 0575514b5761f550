//! Fluent construction of a [`Modem`].

use std::time::Duration;

use satlink_core::error::{Error, Result};
use satlink_core::transport::Transport;
use satlink_protocol::session::{Session, SessionConfig};
use satlink_transport::SerialTransport;

use crate::modem::{Modem, MAX_PAYLOAD_LEN};

/// Builder for a [`Modem`].
///
/// # Example
///
/// ```no_run
/// use satlink_modem::ModemBuilder;
///
/// # async fn run() -> satlink_core::error::Result<()> {
/// let mut modem = ModemBuilder::new()
///     .serial_port("/dev/ttyUSB0")
///     .baud_rate(19_200)
///     .build()
///     .await?;
/// modem.gps_fix().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModemBuilder {
    serial_port: Option<String>,
    baud_rate: u32,
    max_payload: usize,
    session: SessionConfig,
}

impl ModemBuilder {
    pub fn new() -> Self {
        ModemBuilder {
            serial_port: None,
            baud_rate: 19_200,
            max_payload: MAX_PAYLOAD_LEN,
            session: SessionConfig::default(),
        }
    }

    /// Serial device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Baud rate for the serial link (default 19 200).
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Deadline for reading one response line (default 7000 ms).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.session.read_timeout = timeout;
        self
    }

    /// How many times to resend the last command after a boot banner
    /// (default 1).
    pub fn boot_retries(mut self, retries: u32) -> Self {
        self.session.boot_retries = retries;
        self
    }

    /// Substring identifying the boot banner, for firmware with a
    /// non-standard banner layout.
    pub fn banner_marker(mut self, marker: &str) -> Self {
        self.session.banner_marker = marker.to_string();
        self
    }

    /// Largest payload [`send_payload`](Modem::send_payload) will accept,
    /// for firmware with a different broadcast size (default 144 bytes).
    pub fn max_payload(mut self, bytes: usize) -> Self {
        self.max_payload = bytes;
        self
    }

    /// Open the configured serial port and build the modem.
    pub async fn build(self) -> Result<Modem> {
        let port = self
            .serial_port
            .as_deref()
            .ok_or_else(|| Error::InvalidParameter("no serial port configured".to_string()))?;
        let transport = SerialTransport::open(port, self.baud_rate).await?;
        Ok(self.attach(Box::new(transport)))
    }

    /// Build the modem over an already-open transport.
    pub fn build_with_transport(self, transport: Box<dyn Transport>) -> Modem {
        self.attach(transport)
    }

    fn attach(self, transport: Box<dyn Transport>) -> Modem {
        Modem::new(
            Session::with_config(transport, self.session),
            self.max_payload,
        )
    }
}

impl Default for ModemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
