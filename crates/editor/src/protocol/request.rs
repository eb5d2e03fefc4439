//! HTTP request header handling implementation.
//!
//! [`RequestHeader`] keeps the raw header text as submitted, with network line endings, so
//! rendering it back is byte exact, and a parsed `http::Request<()>` next to it for field access.

use std::str::FromStr;

use http::{HeaderMap, Method, Request, Uri, Version};
use httparse::Status;
use tracing::{trace, warn};

use crate::ensure;
use crate::protocol::header::normalized;
use crate::protocol::{HeaderUnit, MAX_HEADER_NUM, MalformedHeaderError};

/// Represents an editable HTTP request header.
#[derive(Debug)]
pub struct RequestHeader {
    raw: String,
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Parses a raw request header.
    ///
    /// Bare `\n` line ends are turned into `\r\n` and missing parts of the `\r\n\r\n`
    /// terminator are appended before parsing; the kept raw text always ends with the
    /// terminator.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedHeaderError`] if:
    /// - the request line or a header field is invalid
    /// - the number of headers exceeds [`MAX_HEADER_NUM`]
    /// - there is data after the terminator
    /// - the HTTP version is neither 1.0 nor 1.1
    pub fn parse(raw: &str) -> Result<Self, MalformedHeaderError> {
        let raw = normalized(raw);

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let offset = match req.parse(raw.as_bytes())? {
            Status::Complete(offset) => offset,
            Status::Partial => return Err(MalformedHeaderError::Incomplete),
        };
        trace!(header_size = offset, "parsed request header");
        ensure!(offset == raw.len(), MalformedHeaderError::trailing_data(offset));

        let version = match req.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            // http2 and http3 have no textual header
            v => return Err(MalformedHeaderError::InvalidVersion(v)),
        };

        let mut builder = Request::builder()
            .method(req.method.ok_or(MalformedHeaderError::InvalidMethod)?)
            .uri(req.path.ok_or(MalformedHeaderError::InvalidUri)?)
            .version(version);

        for header in req.headers.iter() {
            builder = builder.header(header.name, header.value);
        }

        let inner = builder.body(()).map_err(|e| {
            warn!(cause = %e, "request line or header field rejected");
            MalformedHeaderError::invalid_header(e)
        })?;

        Ok(Self { raw, inner })
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl FromStr for RequestHeader {
    type Err = MalformedHeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl HeaderUnit for RequestHeader {
    fn raw_text(&self) -> String {
        self.raw.clone()
    }

    fn set_raw_text(&mut self, raw: &str) -> Result<(), MalformedHeaderError> {
        *self = Self::parse(raw)?;
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        self.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
    }
}
