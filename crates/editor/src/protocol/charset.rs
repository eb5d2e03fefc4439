//! Character set handling for message bodies, backed by `encoding_rs`.

use encoding_rs::{Encoding, WINDOWS_1252};
use mime::Mime;
use tracing::{debug, warn};

/// Charset assumed when a body does not declare one, or declares one we don't know.
///
/// Every byte decodes to a distinct character and encodes back to itself, so a body of
/// unknown or binary content survives a render and apply unchanged.
pub const DEFAULT_CHARSET: &str = "windows-1252";

/// Resolves a charset label (`utf-8`, `ISO-8859-1`, `latin1`, ...) to an encoding.
pub fn lookup(label: Option<&str>) -> &'static Encoding {
    let Some(label) = label else {
        return WINDOWS_1252;
    };

    Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        warn!(charset = label, fallback = DEFAULT_CHARSET, "unknown charset");
        WINDOWS_1252
    })
}

/// Decodes `bytes` with the charset named by `label`.
///
/// Malformed sequences are replaced by U+FFFD. A byte order mark is not sniffed, it is
/// decoded as part of the content.
pub fn decode(bytes: &[u8], label: Option<&str>) -> String {
    let encoding = lookup(label);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        debug!(charset = encoding.name(), "body contains malformed sequences");
    }
    text.into_owned()
}

/// Encodes `text` with the charset named by `label`.
///
/// Characters the charset can't represent are written as HTML numeric character references.
pub fn encode(text: &str, label: Option<&str>) -> Vec<u8> {
    let (bytes, encoding, had_errors) = lookup(label).encode(text);
    if had_errors {
        debug!(charset = encoding.name(), "body contains unmappable characters");
    }
    bytes.into_owned()
}

/// Extracts the `charset` parameter of a `Content-Type` value.
pub fn charset_of(content_type: &str) -> Option<String> {
    let mime: Mime = content_type.parse().ok()?;
    mime.get_param(mime::CHARSET).map(|charset| charset.as_str().to_owned())
}
