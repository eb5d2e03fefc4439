//! HTTP response header handling implementation.
//!
//! Same shape as [`RequestHeader`](crate::protocol::RequestHeader): the raw text is the
//! source of truth, a parsed `http::Response<()>` backs the field lookups.

use std::str::FromStr;

use http::{HeaderMap, Response, StatusCode, Version};
use httparse::Status;
use tracing::{trace, warn};

use crate::ensure;
use crate::protocol::header::normalized;
use crate::protocol::{HeaderUnit, MAX_HEADER_NUM, MalformedHeaderError};

/// Represents an editable HTTP response header.
#[derive(Debug)]
pub struct ResponseHeader {
    raw: String,
    reason: Option<String>,
    inner: Response<()>,
}

impl AsRef<Response<()>> for ResponseHeader {
    fn as_ref(&self) -> &Response<()> {
        &self.inner
    }
}

impl ResponseHeader {
    /// Parses a raw response header, normalizing its line ends to `\r\n` and appending the
    /// missing parts of the terminator.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedHeaderError`] if the status line or a header field is invalid,
    /// there are too many headers, data follows the terminator, or the version is not
    /// HTTP/1.0 or HTTP/1.1.
    pub fn parse(raw: &str) -> Result<Self, MalformedHeaderError> {
        let raw = normalized(raw);

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut resp = httparse::Response::new(&mut headers);

        let offset = match resp.parse(raw.as_bytes())? {
            Status::Complete(offset) => offset,
            Status::Partial => return Err(MalformedHeaderError::Incomplete),
        };
        trace!(header_size = offset, "parsed response header");
        ensure!(offset == raw.len(), MalformedHeaderError::trailing_data(offset));

        let version = match resp.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            v => return Err(MalformedHeaderError::InvalidVersion(v)),
        };

        let mut builder = Response::builder().status(resp.code.ok_or(MalformedHeaderError::InvalidStatus)?).version(version);

        for header in resp.headers.iter() {
            builder = builder.header(header.name, header.value);
        }

        let inner = builder.body(()).map_err(|e| {
            warn!(cause = %e, "status line or header field rejected");
            MalformedHeaderError::invalid_header(e)
        })?;
        let reason = resp.reason.filter(|reason| !reason.is_empty()).map(str::to_owned);

        Ok(Self { raw, reason, inner })
    }

    /// Returns the response's status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Returns the reason phrase as written in the status line, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns the response's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the response's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl FromStr for ResponseHeader {
    type Err = MalformedHeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl HeaderUnit for ResponseHeader {
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
