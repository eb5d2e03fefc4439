//! Message capabilities and their concrete implementations.
//!
//! The text codec never depends on a concrete message type. It is written against:
//!
//! - [`HeaderUnit`]: raw header text, re-parsing from raw text, field lookup
//! - [`BodyUnit`]: raw bytes, declared charset, text conversion, length
//! - [`EditableMessage`]: one header unit plus one body unit
//!
//! This module also provides implementations for both message directions:
//!
//! - [`RequestHeader`] and [`ResponseHeader`]: `httparse` based header grammar that keeps
//!   the submitted raw text byte exact, in network line endings
//! - [`HttpBody`]: buffered body with `encoding_rs` charset handling
//! - [`RequestMessage`] and [`ResponseMessage`]: the two message variants
//!
//! Errors raised by the header grammar are reported as [`MalformedHeaderError`].

/// Maximum number of header fields accepted by the header grammar
pub const MAX_HEADER_NUM: usize = 128;

mod header;
pub use header::CRLF;
pub use header::HEADER_TERMINATOR;
pub use header::HeaderUnit;
pub use header::to_network;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHeader;

mod body;
pub use body::BodyUnit;
pub use body::HttpBody;

mod message;
pub use message::EditableMessage;
pub use message::HttpMessage;
pub use message::RequestMessage;
pub use message::ResponseMessage;

mod error;
pub use error::MalformedHeaderError;

pub mod charset;

#[cfg(test)]
pub(crate) use body::MockBodyUnit;
#[cfg(test)]
pub(crate) use header::MockHeaderUnit;
