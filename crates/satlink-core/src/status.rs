//! Modem status codes and their category/type decomposition.
//!
//! Every response line from the modem carries a 3-digit decimal status code.
//! The code encodes two orthogonal pieces of information:
//!
//! - **Category**: `code / 100` — which firmware subsystem produced the
//!   response (command parsing, argument conversion, command execution, ...).
//!   Category 9 is reserved for codes synthesized locally by the decoder and
//!   never appears on the wire.
//! - **Type**: `(code % 100) / 25` — whether the response is informational,
//!   an error, or a debug notification.
//!
//! For example, code `600` is category 6 (command execution), type 0 (info):
//! the generic "OK" response. Code `633` is category 6, type 1 (error).

use std::fmt;

/// A 3-digit modem status code.
///
/// Wraps the raw numeric value and provides the category/type split via
/// [`category`](StatusCode::category) and [`code_type`](StatusCode::code_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Command executed successfully.
    pub const OK: StatusCode = StatusCode(600);
    /// The modem accepted the sleep request and is shutting down.
    pub const STARTING_TO_SLEEP: StatusCode = StatusCode(602);
    /// Sleep refused because the wakeup pin is held high.
    pub const CANNOT_SLEEP_WAKEUP_HIGH: StatusCode = StatusCode(603);
    /// Operation refused while the GPS receiver is enabled.
    pub const GPS_ENABLED: StatusCode = StatusCode(633);

    // Locally synthesized codes (category 9). These are produced by the
    // response decoder on this side of the link and never transmitted.

    /// Response too short to carry any framing.
    pub const DECODE_TOO_SHORT: StatusCode = StatusCode(950);
    /// Response had no terminating delimiter.
    pub const DECODE_NO_END: StatusCode = StatusCode(951);
    /// A quoted string argument could not be parsed.
    pub const DECODE_STRING_ARG: StatusCode = StatusCode(952);
    /// Response lacked recognizable framing.
    pub const DECODE_NO_BEGIN: StatusCode = StatusCode(953);
    /// The line was the modem's unsolicited boot banner.
    pub const DEVICE_JUST_BOOTED: StatusCode = StatusCode(954);

    /// The raw numeric code.
    pub fn value(self) -> u16 {
        self.0
    }

    /// The firmware subsystem that produced this code (`code / 100`).
    pub fn category(self) -> CodeCategory {
        CodeCategory::from_code(self.0)
    }

    /// The response type (`(code % 100) / 25`).
    pub fn code_type(self) -> CodeType {
        match (self.0 % 100) / 25 {
            0 => CodeType::Info,
            1 => CodeType::Error,
            _ => CodeType::Debug,
        }
    }

    /// Whether this is an informational code.
    pub fn is_info(self) -> bool {
        self.code_type() == CodeType::Info
    }

    /// Whether this code signals an error.
    pub fn is_error(self) -> bool {
        self.code_type() == CodeType::Error
    }

    /// Whether this is a debug notification.
    pub fn is_debug(self) -> bool {
        self.code_type() == CodeType::Debug
    }

    /// Whether this code was synthesized locally by the decoder rather
    /// than received from the modem.
    pub fn is_local(self) -> bool {
        self.category() == CodeCategory::LocalDecode
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

/// Firmware subsystem indicated by the hundreds digit of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCategory {
    /// Category 1: command line parsing.
    CommandParsing,
    /// Category 2: string interpolation.
    StringInterpolation,
    /// Category 3: argument conversion.
    ArgumentConversion,
    /// Category 4: command handling.
    CommandHandling,
    /// Category 5: raw input handling.
    RawInputHandling,
    /// Category 6: command execution.
    CommandExecution,
    /// Category 9: reserved for codes synthesized by the local decoder.
    LocalDecode,
    /// A category outside the documented range.
    Unknown(u16),
}

impl CodeCategory {
    fn from_code(code: u16) -> Self {
        match code / 100 {
            1 => CodeCategory::CommandParsing,
            2 => CodeCategory::StringInterpolation,
            3 => CodeCategory::ArgumentConversion,
            4 => CodeCategory::CommandHandling,
            5 => CodeCategory::RawInputHandling,
            6 => CodeCategory::CommandExecution,
            9 => CodeCategory::LocalDecode,
            other => CodeCategory::Unknown(other),
        }
    }
}

/// Response type indicated by the tens/units digits of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    /// Informational response (00-24).
    Info,
    /// Error response (25-49).
    Error,
    /// Debug notification (50-74).
    Debug,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_info_execution() {
        assert_eq!(StatusCode::OK.category(), CodeCategory::CommandExecution);
        assert_eq!(StatusCode::OK.code_type(), CodeType::Info);
        assert!(StatusCode::OK.is_info());
        assert!(!StatusCode::OK.is_error());
    }

    #[test]
    fn gps_enabled_is_error() {
        assert_eq!(
            StatusCode::GPS_ENABLED.category(),
            CodeCategory::CommandExecution
        );
        assert_eq!(StatusCode::GPS_ENABLED.code_type(), CodeType::Error);
        assert!(StatusCode::GPS_ENABLED.is_error());
    }

    #[test]
    fn local_codes_are_category_nine() {
        for code in [
            StatusCode::DECODE_TOO_SHORT,
            StatusCode::DECODE_NO_END,
            StatusCode::DECODE_STRING_ARG,
            StatusCode::DECODE_NO_BEGIN,
            StatusCode::DEVICE_JUST_BOOTED,
        ] {
            assert_eq!(code.category(), CodeCategory::LocalDecode);
            assert!(code.is_local());
        }
    }

    #[test]
    fn type_boundaries() {
        assert_eq!(StatusCode(600).code_type(), CodeType::Info);
        assert_eq!(StatusCode(624).code_type(), CodeType::Info);
        assert_eq!(StatusCode(625).code_type(), CodeType::Error);
        assert_eq!(StatusCode(649).code_type(), CodeType::Error);
        assert_eq!(StatusCode(650).code_type(), CodeType::Debug);
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(StatusCode(600).to_string(), "600");
        assert_eq!(StatusCode(42).to_string(), "042");
    }

    #[test]
    fn unknown_category() {
        assert_eq!(StatusCode(799).category(), CodeCategory::Unknown(7));
    }
}
