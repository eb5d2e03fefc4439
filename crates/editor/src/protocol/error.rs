use thiserror::Error;

/// Raised by a [`HeaderUnit`](crate::protocol::HeaderUnit) when the submitted raw text
/// does not form a well formed http header.
#[derive(Error, Debug)]
pub enum MalformedHeaderError {
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("incomplete header, the start line or a header field is missing its end")]
    Incomplete,

    #[error("unexpected data after the header terminator at offset {offset}")]
    TrailingData { offset: usize },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid http status")]
    InvalidStatus,
}

impl MalformedHeaderError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn trailing_data(offset: usize) -> Self {
        Self::TrailingData { offset }
    }
}

impl From<httparse::Error> for MalformedHeaderError {
    fn from(e: httparse::Error) -> Self {
        match e {
            httparse::Error::TooManyHeaders => Self::too_many_headers(crate::protocol::MAX_HEADER_NUM),
            httparse::Error::Version => Self::InvalidVersion(None),
            e => Self::invalid_header(e),
        }
    }
}
