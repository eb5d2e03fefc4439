//! Text codec for editable http messages
//!
//! # Architecture
//!
//! - [`MessageTextCodec`]: renders the bound message as text and applies edited text back
//! - [`line_break`]: network line endings vs. display line breaks
//! - [`ContentEncoding`]: decides whether the body is transcoded
//! - [`CompressionCodec`]: the transcoder itself, [`GzipCodec`] by default
//!
//! # Example
//!
//! ```
//! use micro_http_editor::codec::MessageTextCodec;
//! use micro_http_editor::protocol::{RequestHeader, RequestMessage};
//!
//! let header = RequestHeader::parse("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//! let mut codec = MessageTextCodec::new();
//! codec.set_message(Some(RequestMessage::from_wire(header, "hello")));
//!
//! let text = codec.render().unwrap();
//! assert_eq!(text, "GET / HTTP/1.1\nHost: localhost\n\nhello");
//!
//! codec.apply(&text.replace("hello", "hello world")).unwrap();
//! ```

mod compression;
mod content_encoding;
mod error;
mod text_codec;

pub mod line_break;

pub use compression::CompressionCodec;
pub use compression::GzipCodec;
pub use content_encoding::ContentEncoding;
pub use content_encoding::GZIP;
pub use error::CodecError;
pub use text_codec::MessageTextCodec;
