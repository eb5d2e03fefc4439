/// The content coding token the text codec transcodes.
pub const GZIP: &str = "gzip";

/// Transform the text codec applies to a body, as declared by its `Content-Encoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// The body is gzip compressed, it is decompressed for display and recompressed once edited.
    Gzip,
    /// Any other value, or no value at all. The body passes through.
    Identity,
}

impl ContentEncoding {
    /// Detects the transform from the raw `Content-Encoding` field value.
    ///
    /// Only the exact, single `gzip` token matches: coding lists such as `gzip, br` and
    /// other spellings are left as identity.
    // TODO: accept case insensitive tokens and coding lists once encodings other than gzip are transcoded
    pub fn detect(value: Option<&str>) -> Self {
        match value {
            Some(GZIP) => Self::Gzip,
            _ => Self::Identity,
        }
    }
}
