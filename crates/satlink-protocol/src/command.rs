//! Outbound command encoding.
//!
//! Commands are ASCII lines of the form `name\r\n` (no arguments) or
//! `name(arg1,arg2,...)\r\n`. Argument types are encoded as follows:
//!
//! - **Strings** are double-quoted. Carriage return and line feed are
//!   rewritten as the two-character escapes `\r` and `\n`; backslash,
//!   double quote, and single quote are prefixed with a backslash.
//! - **Integers** are bare decimal tokens, or `0x` + uppercase hex via
//!   [`Command::arg_hex`].
//! - **Booleans** are the literal tokens `true` / `false`.
//! - **Floats** are formatted with exactly five fractional digits and then
//!   transmitted as *string* arguments -- quoted decimal text, not a bare
//!   numeric token.
//!
//! Encoding is pure: [`Command`] only builds bytes, it performs no I/O.
//! The session layer is responsible for draining stale input and writing
//! the finished buffer to the transport.

use bytes::{BufMut, BytesMut};

/// The two-byte terminator appended to every command line.
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// An outbound command under construction.
///
/// Builder-style: start with [`Command::new`], chain `arg_*` calls, and
/// finish with [`Command::into_bytes`]. Encoding the same logical command
/// twice produces byte-identical wire output.
///
/// # Example
///
/// ```
/// use satlink_protocol::Command;
///
/// let cmd = Command::new("set_location")
///     .arg_float(52.37403)
///     .arg_float(4.88969)
///     .arg_float(0.0);
/// assert_eq!(
///     cmd.into_bytes(),
///     b"set_location(\"52.37403\",\"4.88969\",\"0.00000\")\r\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    buf: String,
    has_args: bool,
}

impl Command {
    /// Start a new command with the given name.
    pub fn new(name: &str) -> Self {
        Command {
            buf: name.to_string(),
            has_args: false,
        }
    }

    /// Shared prefix step before every typed append: `(` for the first
    /// argument, `,` for each subsequent one.
    fn begin_arg(&mut self) {
        if self.has_args {
            self.buf.push(',');
        } else {
            self.buf.push('(');
            self.has_args = true;
        }
    }

    /// Append a quoted, escaped string argument.
    pub fn arg_str(mut self, value: &str) -> Self {
        self.begin_arg();
        self.buf.push('"');
        push_escaped(&mut self.buf, value);
        self.buf.push('"');
        self
    }

    /// Append a decimal integer argument.
    pub fn arg_int(mut self, value: i32) -> Self {
        self.begin_arg();
        self.buf.push_str(&value.to_string());
        self
    }

    /// Append an integer argument as `0x` + uppercase hexadecimal.
    pub fn arg_hex(mut self, value: u32) -> Self {
        self.begin_arg();
        self.buf.push_str(&format!("0x{value:X}"));
        self
    }

    /// Append a boolean argument (`true` / `false`).
    pub fn arg_bool(mut self, value: bool) -> Self {
        self.begin_arg();
        self.buf.push_str(if value { "true" } else { "false" });
        self
    }

    /// Append a float argument.
    ///
    /// The value is formatted with exactly five fractional digits and
    /// encoded through the string path, so it arrives quoted.
    pub fn arg_float(self, value: f64) -> Self {
        self.arg_str(&format!("{value:.5}"))
    }

    /// Finish the command: close the argument list if one was opened and
    /// append the CRLF line terminator.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut wire = BytesMut::with_capacity(self.buf.len() + 3);
        wire.put_slice(self.buf.as_bytes());
        if self.has_args {
            wire.put_u8(b')');
        }
        wire.put_slice(LINE_TERMINATOR);
        wire.to_vec()
    }
}

/// Append `value` to `buf` with protocol escaping applied.
///
/// CR and LF become the literal two-character sequences `\r` and `\n`;
/// backslash, double quote, and single quote get a backslash prefix; all
/// other characters pass through unchanged.
pub(crate) fn push_escaped(buf: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\r' => buf.push_str("\\r"),
            '\n' => buf.push_str("\\n"),
            '\\' | '"' | '\'' => {
                buf.push('\\');
                buf.push(c);
            }
            _ => buf.push(c),
        }
    }
}
