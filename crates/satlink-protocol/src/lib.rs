//! satlink-protocol: the command/response protocol engine for the modem's
//! serial command language.
//!
//! The engine is composed of four pieces, layered leaves-first:
//!
//! - [`line`] — reads one CRLF-terminated line from a
//!   [`Transport`](satlink_core::Transport) under a bounded deadline
//! - [`command`] — builds outbound command lines with typed, escaped
//!   arguments
//! - [`decode`] — pure parsing of a response line into a status code and
//!   argument list, including the unsolicited boot banner
//! - [`session`] — one round trip: send, read, decode, and the
//!   resend-once recovery when the modem reports it just rebooted
//!
//! Device-specific operations (set location, payload upload, sleep, ...)
//! live in `satlink-modem` and are thin callers of [`Session`].

pub mod command;
pub mod decode;
pub mod line;
pub mod session;

pub use command::{Command, LINE_TERMINATOR};
pub use decode::{decode, decode_with_banner, BootBanner, Decoded, DEFAULT_BANNER_MARKER};
pub use line::{read_line, RawLine, DEFAULT_READ_TIMEOUT};
pub use session::{Session, SessionConfig};
