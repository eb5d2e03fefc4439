//! The body capability consumed by the text codec, and its in-memory implementation.

use bytes::Bytes;

use crate::protocol::charset;

/// Access to the body of an http message.
///
/// The body holds raw bytes and optionally declares the charset used to interpret them
/// as text. Text conversion in both directions is the body's own responsibility.
#[cfg_attr(test, mockall::automock)]
pub trait BodyUnit {
    /// Returns the raw bytes of the body.
    fn bytes(&self) -> Bytes;

    /// Replaces the body with raw bytes, as is.
    fn set_bytes(&mut self, bytes: Bytes);

    /// Returns the body decoded with its declared charset.
    fn text(&self) -> String;

    /// Replaces the body with `text` encoded with its declared charset.
    fn set_text(&mut self, text: &str);

    /// Returns the declared charset name, `None` means [`charset::DEFAULT_CHARSET`].
    fn charset(&self) -> Option<String>;

    /// Returns the byte length of the current content.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully buffered message body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpBody {
    bytes: Bytes,
    charset: Option<String>,
}

impl HttpBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { bytes: bytes.into(), charset: None }
    }

    /// Creates a body holding `text` encoded with `charset`.
    pub fn from_text(text: &str, charset: Option<&str>) -> Self {
        let bytes = charset::encode(text, charset);
        Self { bytes: Bytes::from(bytes), charset: charset.map(str::to_owned) }
    }

    /// Declares the charset of the body, the bytes are left as they are.
    #[must_use]
    pub fn with_charset(mut self, charset: Option<String>) -> Self {
        self.charset = charset;
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl BodyUnit for HttpBody {
    fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    fn set_bytes(&mut self, bytes: Bytes) {
        self.bytes = bytes;
    }

    fn text(&self) -> String {
        charset::decode(&self.bytes, self.charset.as_deref())
    }

    fn set_text(&mut self, text: &str) {
        self.bytes = Bytes::from(charset::encode(text, self.charset.as_deref()));
    }

    fn charset(&self) -> Option<String> {
        self.charset.clone()
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }
}
