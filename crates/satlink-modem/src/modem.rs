//! High-level modem operations.
//!
//! [`Modem`] wraps a [`Session`] and exposes one method per device
//! operation. Every method follows the same shape: build the command with
//! the typed encoder, run one half-duplex round trip, then map the status
//! code to a typed result. Codes other than the ones a given operation
//! expects come back as [`Error::Device`] so callers keep access to the
//! raw code.

use tracing::{debug, info};

use satlink_core::error::{Error, Result};
use satlink_core::status::StatusCode;
use satlink_protocol::command::Command;
use satlink_protocol::decode::Decoded;
use satlink_protocol::session::Session;

/// Largest payload the modem accepts in a single `set_payload` exchange.
pub const MAX_PAYLOAD_LEN: usize = 144;

/// Scheduled wakeup reported by [`Modem::next_wakeup_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeupTime {
    /// Firmware wakeup reason code.
    pub reason: i32,
    /// Seconds until the wakeup fires.
    pub seconds_left: i32,
}

/// Outcome of a [`Modem::go_to_sleep`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStatus {
    /// The modem accepted the request and is shutting down. A `reason` of
    /// zero means only the wakeup pin will bring it back; any other value
    /// also schedules a timed wakeup after `seconds_left` seconds.
    Sleeping { reason: i32, seconds_left: i32 },

    /// Sleep refused: the wakeup pin is currently held high.
    WakeupPinHigh,
}

/// A connected satellite modem.
///
/// Construct one with [`ModemBuilder`](crate::ModemBuilder). All methods
/// take `&mut self`: the link is half-duplex and the session serializes
/// every exchange.
pub struct Modem {
    session: Session,
    max_payload: usize,
}

impl Modem {
    pub(crate) fn new(session: Session, max_payload: usize) -> Self {
        Modem {
            session,
            max_payload,
        }
    }

    /// Stage a payload for the next satellite broadcast.
    ///
    /// Two round trips: `set_payload(len)` must be acknowledged with OK
    /// before the raw payload bytes are written, and the modem confirms
    /// receipt of the bytes with a second OK.
    pub async fn send_payload(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.max_payload {
            return Err(Error::InvalidParameter(format!(
                "payload is {} bytes, limit is {}",
                data.len(),
                self.max_payload
            )));
        }

        let cmd = Command::new("set_payload").arg_int(data.len() as i32);
        self.exchange(cmd, 0).await?;

        self.session.write_raw(data).await?;
        expect_ok(self.session.read_reply(0).await?)?;
        info!(len = data.len(), "payload staged for broadcast");
        Ok(())
    }

    /// Forward an NMEA sentence to the GPS receiver.
    pub async fn send_nmea(&mut self, sentence: &str) -> Result<()> {
        let cmd = Command::new("run_nmea").arg_str(sentence);
        self.exchange(cmd, 0).await?;
        Ok(())
    }

    /// Query the next scheduled wakeup.
    pub async fn next_wakeup_time(&mut self) -> Result<WakeupTime> {
        let args = self.exchange(Command::new("get_next_wakeup_time"), 2).await?;
        Ok(WakeupTime {
            reason: parse_int_arg(&args, 0)?,
            seconds_left: parse_int_arg(&args, 1)?,
        })
    }

    /// Read the modem's clock as ISO 8601 text.
    pub async fn datetime(&mut self) -> Result<String> {
        let args = self.exchange(Command::new("get_datetime"), 1).await?;
        take_string_arg(args, 0)
    }

    /// Set the modem's clock from ISO 8601 text.
    pub async fn set_datetime(&mut self, iso8601: &str) -> Result<()> {
        let cmd = Command::new("set_datetime").arg_str(iso8601);
        self.exchange(cmd, 1).await?;
        Ok(())
    }

    /// Enable or disable the GPS receiver.
    pub async fn set_gps_mode(&mut self, enabled: bool) -> Result<()> {
        let cmd = Command::new("set_gps_mode").arg_bool(enabled);
        self.exchange(cmd, 1).await?;
        Ok(())
    }

    /// Set the modem's position manually.
    ///
    /// Used instead of [`gps_fix`](Modem::gps_fix) on installations
    /// without GPS reception. The modem refuses this with code 633 while
    /// the GPS receiver is enabled.
    pub async fn set_location(&mut self, latitude: f64, longitude: f64, altitude: f64) -> Result<()> {
        let cmd = Command::new("set_location")
            .arg_float(latitude)
            .arg_float(longitude)
            .arg_float(altitude);
        // The modem echoes latitude and longitude back.
        self.exchange(cmd, 2).await?;
        Ok(())
    }

    /// Ask the modem to acquire a GPS fix.
    pub async fn gps_fix(&mut self) -> Result<()> {
        self.exchange(Command::new("do_gps_fix"), 0).await?;
        Ok(())
    }

    /// Request that the modem power down until its next wakeup.
    ///
    /// Codes 602 and 603 are both well-defined outcomes here and map onto
    /// [`SleepStatus`]; anything else is surfaced as [`Error::Device`].
    pub async fn go_to_sleep(&mut self) -> Result<SleepStatus> {
        let decoded = self
            .session
            .send_and_receive(Command::new("go_to_sleep"), 2)
            .await?;

        match decoded {
            Decoded::Response { code, args } if code == StatusCode::STARTING_TO_SLEEP => {
                let status = SleepStatus::Sleeping {
                    reason: parse_int_arg(&args, 0)?,
                    seconds_left: parse_int_arg(&args, 1)?,
                };
                debug!(?status, "modem going to sleep");
                Ok(status)
            }
            Decoded::Response { code, .. } if code == StatusCode::CANNOT_SLEEP_WAKEUP_HIGH => {
                Ok(SleepStatus::WakeupPinHigh)
            }
            other => Err(Error::Device(other.status_code())),
        }
    }

    /// Query the firmware version string.
    pub async fn firmware_version(&mut self) -> Result<String> {
        let args = self.exchange(Command::new("get_firmware_version"), 1).await?;
        take_string_arg(args, 0)
    }

    /// The raw text of the most recently read response line.
    pub fn last_response(&self) -> Option<&str> {
        self.session.last_response()
    }

    /// The status code of the most recent exchange, including locally
    /// synthesized decode codes.
    pub fn last_code(&self) -> Option<StatusCode> {
        self.session.last_code()
    }

    /// Whether the underlying transport is connected.
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Close the underlying transport.
    pub async fn close(&mut self) -> Result<()> {
        self.session.close().await
    }

    /// Escape hatch for commands this crate has no wrapper for.
    pub fn session(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run one round trip and require an OK response, returning its
    /// arguments.
    async fn exchange(&mut self, command: Command, max_args: usize) -> Result<Vec<String>> {
        expect_ok(self.session.send_and_receive(command, max_args).await?)
    }
}

/// Map a decoded response to its arguments, requiring status OK.
///
/// A boot banner reaching this point has already survived the session's
/// resend, so it is reported through its local status code like any other
/// unexpected outcome.
fn expect_ok(decoded: Decoded) -> Result<Vec<String>> {
    match decoded {
        Decoded::Response { code, args } if code == StatusCode::OK => Ok(args),
        other => Err(Error::Device(other.status_code())),
    }
}

fn parse_int_arg(args: &[String], index: usize) -> Result<i32> {
    let arg = args
        .get(index)
        .ok_or_else(|| Error::Protocol(format!("missing response argument {index}")))?;
    arg.parse()
        .map_err(|_| Error::Protocol(format!("argument {index} is not an integer: {arg:?}")))
}

fn take_string_arg(mut args: Vec<String>, index: usize) -> Result<String> {
    if index < args.len() {
        Ok(args.swap_remove(index))
    } else {
        Err(Error::Protocol(format!("missing response argument {index}")))
    }
}
