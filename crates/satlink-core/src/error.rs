//! Error types for satlink.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, decode-layer, and
//! device-level failures are all captured here.

use crate::status::StatusCode;

/// A terminal response-decode failure.
///
/// These are synthesized locally when a received line cannot be parsed;
/// none of them is ever retried by the protocol engine. Each maps to a
/// reserved category-9 status code for diagnostics (see
/// [`DecodeError::status_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The line is too short to carry any recognizable framing.
    #[error("response too short to be valid")]
    TooShort,

    /// The argument list was truncated before its closing delimiter.
    #[error("response argument list has no end delimiter")]
    NoEnd,

    /// A quoted string argument had no valid closing quote.
    #[error("malformed string argument in response")]
    StringArgInvalid,

    /// The line did not contain the `API(` response marker or the boot banner.
    #[error("response lacks recognizable framing")]
    NoBegin,
}

impl DecodeError {
    /// The reserved local status code for this failure (950-953).
    pub fn status_code(self) -> StatusCode {
        match self {
            DecodeError::TooShort => StatusCode::DECODE_TOO_SHORT,
            DecodeError::NoEnd => StatusCode::DECODE_NO_END,
            DecodeError::StringArgInvalid => StatusCode::DECODE_STRING_ARG,
            DecodeError::NoBegin => StatusCode::DECODE_NO_BEGIN,
        }
    }
}

/// The error type for all satlink operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port open/configuration failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A received line could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The modem answered with an error status code.
    #[error("device returned status {0}")]
    Device(StatusCode),

    /// The response decoded cleanly but its contents did not match the
    /// operation's expectations (wrong argument count, non-numeric field).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for data from the modem.
    #[error("timeout waiting for response")]
    Timeout,

    /// An invalid parameter was passed to a modem operation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the modem has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the modem was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
