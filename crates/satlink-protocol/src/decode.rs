//! Response decoding: raw line in, status code and arguments out.
//!
//! # Response format
//!
//! ```text
//! API(NNN)\r\n                    no arguments
//! API(NNN: arg1; arg2; ...)\r\n   with arguments
//! ```
//!
//! - `NNN`: 3-digit decimal status code (see
//!   [`StatusCode`](satlink_core::StatusCode) for the category/type split).
//! - Arguments are separated by `"; "`. String arguments are double-quoted
//!   with the same escaping rules the command encoder applies on the way out.
//!
//! The modem also emits one unsolicited line right after a restart, the
//! boot banner:
//!
//! ```text
//! <product-name> API (Build <token> @ <date>)\r\n
//! ```
//!
//! Decoding is a pure function over the line text; it performs no I/O and
//! never panics on malformed input. Leading noise bytes before the `API(`
//! marker are tolerated and discarded.

use satlink_core::error::DecodeError;
use satlink_core::status::StatusCode;

/// Literal marker that opens every normal response.
pub const RESPONSE_MARKER: &str = "API(";

/// Marker identifying the boot banner, after the product name.
///
/// Firmware revisions have varied the product-name prefix, so matching
/// keys on this substring rather than the full banner text. Override via
/// [`decode_with_banner`] if a firmware uses a different banner layout.
pub const DEFAULT_BANNER_MARKER: &str = "API (Build ";

/// Shortest line that can carry any recognizable framing (`API(NNN`).
const MIN_RESPONSE_LEN: usize = 7;

/// Build identifier and date extracted from the boot banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootBanner {
    /// Build token (commit hash or version tag).
    pub build: String,
    /// Build date text, verbatim.
    pub date: String,
}

/// A successfully decoded input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A normal command response: status code plus positional arguments.
    Response {
        /// The 3-digit status code.
        code: StatusCode,
        /// Decoded arguments, at most the caller-supplied maximum.
        args: Vec<String>,
    },

    /// The unsolicited boot banner. Informational, not an error: the
    /// session layer reacts by resending the last command.
    Booted(BootBanner),
}

impl Decoded {
    /// The status code for this outcome. [`Decoded::Booted`] maps to the
    /// reserved local code 954.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Decoded::Response { code, .. } => *code,
            Decoded::Booted(_) => StatusCode::DEVICE_JUST_BOOTED,
        }
    }
}

/// Decode one response line using the default boot-banner marker.
///
/// At most `max_args` arguments are parsed; any further arguments on the
/// line are left unread.
pub fn decode(line: &str, max_args: usize) -> Result<Decoded, DecodeError> {
    decode_with_banner(line, max_args, DEFAULT_BANNER_MARKER)
}

/// Decode one response line with an explicit boot-banner marker.
pub fn decode_with_banner(
    line: &str,
    max_args: usize,
    banner_marker: &str,
) -> Result<Decoded, DecodeError> {
    if line.len() < MIN_RESPONSE_LEN {
        return Err(DecodeError::TooShort);
    }

    // Discard any leading noise before the response marker.
    let trimmed = match line.find(RESPONSE_MARKER) {
        Some(pos) => &line[pos..],
        None => line,
    };

    if trimmed.starts_with(RESPONSE_MARKER) {
        return decode_status(trimmed, max_args);
    }

    if let Some(banner) = match_banner(line, banner_marker) {
        return Ok(Decoded::Booted(banner));
    }

    Err(DecodeError::NoBegin)
}

/// Decode a line known to start with `API(`.
fn decode_status(line: &str, max_args: usize) -> Result<Decoded, DecodeError> {
    // The three characters after `API(` are the status code.
    let code_str = line.get(4..7).ok_or(DecodeError::TooShort)?;
    let code: u16 = code_str.parse().map_err(|_| DecodeError::NoBegin)?;
    let code = StatusCode(code);

    let mut args = Vec::new();
    if line.as_bytes().get(7) == Some(&b':') && max_args > 0 {
        // Arguments start after `API(NNN: `.
        let text = line.get(9..).ok_or(DecodeError::NoEnd)?;
        parse_args(text, max_args, &mut args)?;
    }

    Ok(Decoded::Response { code, args })
}

/// Parse up to `max_args` arguments from the text after `API(NNN: `.
fn parse_args(text: &str, max_args: usize, args: &mut Vec<String>) -> Result<(), DecodeError> {
    let mut rest = text;

    for _ in 0..max_args {
        if rest.starts_with('"') {
            let (value, end) = parse_string_arg(rest)?;
            args.push(value);
            match end {
                ArgEnd::Last => return Ok(()),
                ArgEnd::More(next) => rest = next,
            }
        } else {
            // Raw argument: runs to the nearest `;` (more follow) or `)`
            // (this was the last one).
            let semi = rest.find(';');
            let close = rest.find(')');
            match (semi, close) {
                (Some(s), c) if c.map_or(true, |c| s < c) => {
                    args.push(rest[..s].to_string());
                    rest = skip_separator(&rest[s..]);
                }
                (_, Some(c)) => {
                    args.push(rest[..c].to_string());
                    return Ok(());
                }
                (_, None) => return Err(DecodeError::NoEnd),
            }
        }
    }

    Ok(())
}

/// What followed a completed argument.
enum ArgEnd<'a> {
    /// The closing `)` -- this was the last argument.
    Last,
    /// A `;` separator -- parsing continues at the contained slice.
    More(&'a str),
}

/// Parse one quoted string argument. `rest` starts at the opening quote.
///
/// Scans for the closing quote with escape awareness: a backslash consumes
/// the byte after it, so escaped quotes (and escaped backslashes followed
/// by a real closing quote) are handled without lookbehind. The returned
/// value is the text strictly between the quotes, unescaped.
fn parse_string_arg(rest: &str) -> Result<(String, ArgEnd<'_>), DecodeError> {
    let bytes = rest.as_bytes();
    let mut i = 1;
    let mut close = None;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                close = Some(i);
                break;
            }
            _ => i += 1,
        }
    }
    let close = close.ok_or(DecodeError::StringArgInvalid)?;
    let value = unescape(&rest[1..close]);

    match bytes.get(close + 1) {
        Some(b')') => Ok((value, ArgEnd::Last)),
        Some(b';') => Ok((value, ArgEnd::More(skip_separator(&rest[close + 1..])))),
        Some(_) => Err(DecodeError::StringArgInvalid),
        None => Err(DecodeError::NoEnd),
    }
}

/// Advance past a `;` separator and the single space that follows it.
fn skip_separator(rest: &str) -> &str {
    let rest = &rest[1..];
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Reverse the command encoder's escaping: `\r` and `\n` become the raw
/// control characters, any other escaped character stands for itself.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('r') => out.push('\r'),
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Try to match the boot banner and extract the build token and date.
fn match_banner(line: &str, marker: &str) -> Option<BootBanner> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let (build, rest) = rest.split_once(" @ ")?;
    let end = rest.find(')')?;
    Some(BootBanner {
        build: build.to_string(),
        date: rest[..end].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::push_escaped;

    // -----------------------------------------------------------------------
    // Responses without arguments
    // -----------------------------------------------------------------------

    #[test]
    fn decode_ok_no_arguments() {
        let decoded = decode("API(600)", 0).unwrap();
        assert_eq!(
            decoded,
            Decoded::Response {
                code: StatusCode::OK,
                args: vec![],
            }
        );
        assert_eq!(decoded.status_code(), StatusCode(600));
    }

    #[test]
    fn decode_discards_leading_noise() {
        let decoded = decode("\x00\x7fnoiseAPI(600)", 0).unwrap();
        assert_eq!(decoded.status_code(), StatusCode(600));
    }

    #[test]
    fn decode_arguments_ignored_when_max_is_zero() {
        let decoded = decode("API(210: 5; \"hello\")", 0).unwrap();
        assert_eq!(
            decoded,
            Decoded::Response {
                code: StatusCode(210),
                args: vec![],
            }
        );
    }

    // -----------------------------------------------------------------------
    // Responses with arguments
    // -----------------------------------------------------------------------

    #[test]
    fn decode_mixed_arguments() {
        let decoded = decode("API(210: 5; \"hello, world\")", 2).unwrap();
        assert_eq!(
            decoded,
            Decoded::Response {
                code: StatusCode(210),
                args: vec!["5".to_string(), "hello, world".to_string()],
            }
        );
    }

    #[test]
    fn decode_single_raw_argument() {
        let decoded = decode("API(602: 3)", 2).unwrap();
        assert_eq!(
            decoded,
            Decoded::Response {
                code: StatusCode::STARTING_TO_SLEEP,
                args: vec!["3".to_string()],
            }
        );
    }

    #[test]
    fn decode_two_raw_arguments() {
        let decoded = decode("API(602: 3; 86400)", 2).unwrap();
        assert_eq!(
            decoded,
            Decoded::Response {
                code: StatusCode(602),
                args: vec!["3".to_string(), "86400".to_string()],
            }
        );
    }

    #[test]
    fn decode_stops_at_max_args() {
        // Three arguments on the wire, caller capacity two.
        let decoded = decode("API(600: 1; 2; 3)", 2).unwrap();
        match decoded {
            Decoded::Response { args, .. } => assert_eq!(args, vec!["1", "2"]),
            other => panic!("expected Response, got {other:?}"),
        }
    }

    #[test]
    fn decode_string_with_escaped_quote() {
        let decoded = decode(r#"API(600: "say \"hi\"")"#, 1).unwrap();
        match decoded {
            Decoded::Response { args, .. } => assert_eq!(args, vec!["say \"hi\""]),
            other => panic!("expected Response, got {other:?}"),
        }
    }

    #[test]
    fn decode_string_then_raw() {
        let decoded = decode("API(600: \"id\"; 42)", 2).unwrap();
        match decoded {
            Decoded::Response { args, .. } => assert_eq!(args, vec!["id", "42"]),
            other => panic!("expected Response, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Decode failures
    // -----------------------------------------------------------------------

    #[test]
    fn decode_too_short() {
        assert_eq!(decode("abc", 5), Err(DecodeError::TooShort));
    }

    #[test]
    fn decode_truncated_argument_list() {
        assert_eq!(decode("API(123: 1; 2", 2), Err(DecodeError::NoEnd));
    }

    #[test]
    fn decode_unterminated_string() {
        assert_eq!(
            decode("API(600: \"never closed", 1),
            Err(DecodeError::StringArgInvalid)
        );
    }

    #[test]
    fn decode_string_closed_at_end_of_input() {
        // Closing quote present but nothing after it: the list never ends.
        assert_eq!(decode("API(600: \"x\"", 1), Err(DecodeError::NoEnd));
    }

    #[test]
    fn decode_no_begin() {
        assert_eq!(decode("hello world", 0), Err(DecodeError::NoBegin));
    }

    #[test]
    fn decode_non_numeric_code() {
        assert_eq!(decode("API(xyz)", 0), Err(DecodeError::NoBegin));
    }

    // -----------------------------------------------------------------------
    // Boot banner
    // -----------------------------------------------------------------------

    #[test]
    fn decode_boot_banner() {
        let decoded = decode("<product> API (Build cafef00d @ 2023-01-01)", 0).unwrap();
        assert_eq!(
            decoded,
            Decoded::Booted(BootBanner {
                build: "cafef00d".to_string(),
                date: "2023-01-01".to_string(),
            })
        );
        assert_eq!(decoded.status_code(), StatusCode::DEVICE_JUST_BOOTED);
    }

    #[test]
    fn decode_custom_banner_marker() {
        let line = "Modem ready (fw deadbeef @ 2024-06-01)";
        assert_eq!(
            decode(line, 0),
            Err(DecodeError::NoBegin),
            "default marker must not match"
        );
        let decoded = decode_with_banner(line, 0, "(fw ").unwrap();
        match decoded {
            Decoded::Booted(banner) => {
                assert_eq!(banner.build, "deadbeef");
                assert_eq!(banner.date, "2024-06-01");
            }
            other => panic!("expected Booted, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Encode/decode round trip for string arguments
    // -----------------------------------------------------------------------

    #[test]
    fn string_argument_round_trip() {
        let cases = [
            "plain",
            "with \"quotes\"",
            "back\\slash",
            "trailing backslash\\",
            "line\r\nbreaks",
            "it's quoted",
            "\\\"mixed\\\" \r\n 'everything'",
            "",
        ];
        for original in cases {
            let mut quoted = String::from("\"");
            push_escaped(&mut quoted, original);
            quoted.push('"');

            let line = format!("API(600: {quoted})");
            let decoded = decode(&line, 1).unwrap();
            match decoded {
                Decoded::Response { args, .. } => {
                    assert_eq!(args, vec![original.to_string()], "case {original:?}");
                }
                other => panic!("expected Response, got {other:?}"),
            }
        }
    }
}
