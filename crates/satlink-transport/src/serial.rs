//! Serial port transport for modem communication.
//!
//! The modem presents a plain UART interface, usually reached through a
//! USB serial adapter or a development kit's virtual COM port. This module
//! provides [`SerialTransport`], which implements the [`Transport`] trait
//! on top of `tokio-serial`.
//!
//! # Example
//!
//! ```no_run
//! use satlink_transport::SerialTransport;
//! use satlink_core::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> satlink_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", 19_200).await?;
//! transport.send(b"get_datetime\r\n").await?;
//!
//! let mut buf = [0u8; 1];
//! let n = transport.receive(&mut buf, Duration::from_secs(7)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

use satlink_core::error::{Error, Result};
use satlink_core::transport::Transport;

/// Serial port configuration.
///
/// The default (19200 8N1, no flow control) matches the modem's UART
/// settings out of the box.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate.
    pub baud_rate: u32,
    /// Number of data bits (typically 8).
    pub data_bits: DataBits,
    /// Number of stop bits (typically 1).
    pub stop_bits: StopBits,
    /// Parity checking (typically none).
    pub parity: Parity,
    /// Flow control (typically none).
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 19_200,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
        }
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => tokio_serial::DataBits::Five,
            DataBits::Six => tokio_serial::DataBits::Six,
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        }
    }
}

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

/// Flow control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    Software,
    Hardware,
}

impl From<FlowControl> for tokio_serial::FlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::None => tokio_serial::FlowControl::None,
            FlowControl::Software => tokio_serial::FlowControl::Software,
            FlowControl::Hardware => tokio_serial::FlowControl::Hardware,
        }
    }
}

/// Serial port transport for modem communication.
pub struct SerialTransport {
    /// The underlying serial port stream.
    port: Option<SerialStream>,
    /// Port name for logging.
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the given baud rate and default 8N1
    /// settings.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. `/dev/ttyUSB0`, `COM3`).
    /// * `baud_rate` - Baud rate (the modem defaults to 19200).
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::open_with_config(port, config).await
    }

    /// Open a serial port with full configuration control.
    pub async fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            data_bits = ?config.data_bits,
            stop_bits = ?config.stop_bits,
            parity = ?config.parity,
            flow_control = ?config.flow_control,
            "Opening serial port"
        );

        let serial_stream = tokio_serial::new(port, config.baud_rate)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into())
            .flow_control(config.flow_control.into())
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("failed to open serial port {}: {}", port, e))
            })?;

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened");

        Ok(Self {
            port: Some(serial_stream),
            port_name: port.to_string(),
        })
    }

    /// The name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = %String::from_utf8_lossy(data).trim_end(),
            "Sending data"
        );

        port.write_all(data).await.map_err(map_io_error)?;

        // Flush so the command is on the wire before we wait for the reply.
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            Error::Io(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, port.read(buf)).await {
            Ok(Ok(n)) => {
                tracing::trace!(port = %self.port_name, bytes = n, "Received data");
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => {
                tracing::trace!(
                    port = %self.port_name,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn discard_pending(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(port = %self.port_name, "Discarding pending input");
        port.clear(ClearBuffer::Input)
            .map_err(|e| Error::Transport(format!("failed to clear input buffer: {e}")))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "Closing serial port");
            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }
            // Dropping the stream closes the port.
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

/// Map serial I/O errors, distinguishing lost connections (unplugged USB
/// adapters) from other failures.
fn map_io_error(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::NotConnected {
        Error::ConnectionLost
    } else {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_config_default() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 19_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.flow_control, FlowControl::None);
    }

    #[test]
    fn config_conversions() {
        let _: tokio_serial::DataBits = DataBits::Eight.into();
        let _: tokio_serial::StopBits = StopBits::Two.into();
        let _: tokio_serial::Parity = Parity::Even.into();
        let _: tokio_serial::FlowControl = FlowControl::Hardware.into();
    }

    #[test]
    fn map_broken_pipe_to_connection_lost() {
        let e = map_io_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(matches!(e, Error::ConnectionLost));

        let e = map_io_error(std::io::Error::new(std::io::ErrorKind::Other, "other"));
        assert!(matches!(e, Error::Io(_)));
    }
}
