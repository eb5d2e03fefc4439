//! The header capability consumed by the text codec.
//!
//! A header unit owns the raw header text of one message, as it travels on the wire
//! (network line endings, terminated by an empty line), and knows how to re-parse itself
//! from edited raw text.

use crate::protocol::MalformedHeaderError;

/// Network line ending used by the raw header text.
pub const CRLF: &str = "\r\n";

/// Terminator of a raw header section: the last field line end followed by an empty line.
pub const HEADER_TERMINATOR: &str = "\r\n\r\n";

/// Access to the header section of an http message.
///
/// Implemented once per message direction ([`RequestHeader`](crate::protocol::RequestHeader),
/// [`ResponseHeader`](crate::protocol::ResponseHeader)); the codec only relies on this trait.
#[cfg_attr(test, mockall::automock)]
pub trait HeaderUnit {
    /// Returns the raw header text, including the trailing empty line.
    fn raw_text(&self) -> String;

    /// Replaces the header with the one parsed from `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedHeaderError`] if `raw` is not a valid header, in which case the
    /// current header must be left untouched.
    fn set_raw_text(&mut self, raw: &str) -> Result<(), MalformedHeaderError>;

    /// Returns the value of the first field named `name`, if any.
    fn field(&self, name: &str) -> Option<String>;
}

/// Replaces every `\n` not already preceded by `\r` with `\r\n`.
pub fn to_network(display: &str) -> String {
    let mut network = String::with_capacity(display.len() + display.len() / 16);
    let mut previous = None;
    for c in display.chars() {
        if c == '\n' && previous != Some('\r') {
            network.push('\r');
        }
        network.push(c);
        previous = Some(c);
    }
    network
}

/// Returns `raw` with network line endings and a complete terminator.
///
/// Header units store this form, so a header parsed from `\n` separated text still
/// renders and applies back to the same raw text.
pub(crate) fn normalized(raw: &str) -> String {
    terminated(&to_network(raw))
}

/// Appends whatever part of [`HEADER_TERMINATOR`] is missing at the end of `raw`.
///
/// Both `\r\n` and a bare `\n` count as a line end, matching what `httparse` accepts.
pub(crate) fn terminated(raw: &str) -> String {
    let mut rest = raw;
    let mut line_ends = 0;
    while line_ends < 2 {
        let Some(stripped) = rest.strip_suffix('\n') else {
            break;
        };
        rest = stripped.strip_suffix('\r').unwrap_or(stripped);
        line_ends += 1;
    }

    let mut owned = String::with_capacity(raw.len() + HEADER_TERMINATOR.len());
    owned.push_str(raw);
    for _ in line_ends..2 {
        owned.push_str(CRLF);
    }
    owned
}
