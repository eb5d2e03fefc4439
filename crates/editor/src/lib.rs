//! An editable text view of HTTP messages
//!
//! This crate turns an HTTP message, header and body, into a single text a user can edit,
//! and parses the edited text back into the message. It is meant for intercepting proxies
//! and debugging tools that let users rewrite a request or a response before it is sent on.
//!
//! # Features
//!
//! - Byte exact round trip: rendering and applying an unchanged text leaves the message as it was
//! - Header line endings shown as `\n`, written back as `\r\n`
//! - Body charsets decoded for display and encoded on save, via `encoding_rs`
//! - Gzip bodies decompressed for display and recompressed on save when edited, via `flate2`
//! - Request and response support through one generic codec
//! - Invalid edits rejected without touching the message
//!
//! # Example
//!
//! ```
//! use micro_http_editor::codec::MessageTextCodec;
//! use micro_http_editor::protocol::{EditableMessage, HeaderUnit, ResponseHeader, ResponseMessage};
//!
//! let header = ResponseHeader::parse("HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n").unwrap();
//! let message = ResponseMessage::from_wire(header, "Hello World!");
//!
//! let mut codec = MessageTextCodec::new();
//! codec.set_message(Some(message));
//!
//! let text = codec.render().unwrap();
//! assert_eq!(text, "HTTP/1.1 200 OK\nContent-Type: text/plain; charset=utf-8\n\nHello World!");
//!
//! // a rejected header leaves the message untouched
//! assert!(codec.apply("Not A Status Line\n\nbye").is_err());
//!
//! codec.apply("HTTP/1.1 404 Not Found\n\nbye").unwrap();
//! let message = codec.take_message().unwrap();
//! assert_eq!(message.header().raw_text(), "HTTP/1.1 404 Not Found\r\n\r\n");
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the header, body and message capabilities, with request and response
//!   implementations
//! - [`codec`]: the text codec and its helpers
//!
//! # Error Handling
//!
//! - [`protocol::MalformedHeaderError`]: the header grammar rejected a raw header
//! - [`codec::CodecError`]: render or apply failed; an invalid edit is told apart from an
//!   unreadable body
//!
//! # Limitations
//!
//! - Only the `gzip` content coding is transcoded, other codings are shown as they are
//! - Content length headers are never updated
//! - HTTP/1.0 and HTTP/1.1 headers only
//! - Maximum number of headers: 128

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
