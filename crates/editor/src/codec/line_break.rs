//! Conversion between network line endings and display line breaks.

use crate::protocol::CRLF;
pub use crate::protocol::to_network;

/// Line break of the editable text.
pub const LF: &str = "\n";

/// Separates the header from the body in the editable text.
pub const SEPARATOR: &str = "\n\n";

/// Replaces every `\r\n` with `\n`.
pub fn to_display(network: &str) -> String {
    network.replace(CRLF, LF)
}

/// Splits the editable text at the first separator.
///
/// Without a separator the whole text is the header and the body is empty.
pub fn split(data: &str) -> (&str, &str) {
    data.split_once(SEPARATOR).unwrap_or((data, ""))
}
