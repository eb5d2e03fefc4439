//! Text view of an http message.
//!
//! [`MessageTextCodec`] renders the bound message as one editable text, the header with
//! display line breaks followed by an empty line and the body, and applies an edited text
//! back into the message.
//!
//! # Transforms
//!
//! Three transforms are undone on render and reapplied on apply, independently:
//!
//! - header line endings: `\r\n` on the wire, `\n` in the text
//! - body charset: handled by the [`BodyUnit`], or by the codec around decompression
//! - gzip content encoding: the text always shows the decoded body, an unedited body keeps
//!   its original compressed bytes
//!
//! Content length metadata is never touched. A header declaring a length that no longer
//! matches the edited body stays as the user wrote it.

use std::io;

use bytes::Bytes;
use http::header::CONTENT_ENCODING;
use tracing::{debug, error, trace, warn};

use crate::codec::compression::{CompressionCodec, GzipCodec};
use crate::codec::content_encoding::ContentEncoding;
use crate::codec::error::CodecError;
use crate::codec::line_break::{LF, SEPARATOR, split, to_display, to_network};
use crate::protocol::charset;
use crate::protocol::{BodyUnit, EditableMessage, HeaderUnit};

/// Converts between a bound message and its editable text.
///
/// The codec holds no state besides the bound message, which may be absent: rendering then
/// yields an empty text and applying does nothing.
#[derive(Debug)]
pub struct MessageTextCodec<M, C = GzipCodec> {
    message: Option<M>,
    compression: C,
}

impl<M: EditableMessage> MessageTextCodec<M> {
    /// Creates a codec with no bound message, transcoding gzip bodies with the default level.
    pub fn new() -> Self {
        Self::with_compression(GzipCodec::default())
    }
}

impl<M: EditableMessage> Default for MessageTextCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EditableMessage, C: CompressionCodec> MessageTextCodec<M, C> {
    pub fn with_compression(compression: C) -> Self {
        Self { message: None, compression }
    }

    /// Binds `message`, or unbinds with `None`, returning the previously bound message.
    pub fn set_message(&mut self, message: Option<M>) -> Option<M> {
        std::mem::replace(&mut self.message, message)
    }

    pub fn message(&self) -> Option<&M> {
        self.message.as_ref()
    }

    pub fn message_mut(&mut self) -> Option<&mut M> {
        self.message.as_mut()
    }

    /// Unbinds and returns the bound message.
    pub fn take_message(&mut self) -> Option<M> {
        self.message.take()
    }

    /// Renders the bound message as editable text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnreadableBody`] if the body is declared gzip encoded but can't
    /// be decoded.
    pub fn render(&self) -> Result<String, CodecError> {
        let Some(message) = self.message.as_ref() else {
            return Ok(String::new());
        };

        let header = to_display(&message.header().raw_text());
        // the raw header ends with its terminator, which the separator replaces
        let header = header.trim_end_matches(LF);
        let body = self.body_text(message)?;

        let mut data = String::with_capacity(header.len() + SEPARATOR.len() + body.len());
        data.push_str(header);
        data.push_str(SEPARATOR);
        data.push_str(&body);
        Ok(data)
    }

    /// Applies an edited text to the bound message.
    ///
    /// The text is split at the first empty line. The header part is handed to the
    /// [`HeaderUnit`] with network line endings; only once it is accepted is the body part
    /// written, gzip encoded again if the (new) header asks for it.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidEdit`] if the header part is rejected, the message is unchanged
    /// - [`CodecError::Compression`] if the body can't be gzip encoded, the header has
    ///   been applied already
    pub fn apply(&mut self, data: &str) -> Result<(), CodecError> {
        let Some(message) = self.message.as_mut() else {
            trace!("no message bound, edited data ignored");
            return Ok(());
        };

        let (header, body) = split(data);
        if let Err(e) = message.header_mut().set_raw_text(&to_network(header)) {
            warn!(cause = %e, "edited header rejected");
            return Err(e.into());
        }

        let previous_len = message.body().len();
        match content_encoding(message.header()) {
            ContentEncoding::Gzip => {
                // recompressing would change the bytes of a body another encoder produced
                if Self::decode_gzip(&self.compression, message.body()).is_ok_and(|decoded| decoded == body) {
                    trace!(len = previous_len, "gzip body not edited, original bytes kept");
                    return Ok(());
                }
                let encoded = charset::encode(body, message.body().charset().as_deref());
                let compressed = self.compression.compress(&encoded).map_err(|e| {
                    error!(cause = %e, "failed to gzip edited body");
                    CodecError::compression(e)
                })?;
                message.body_mut().set_bytes(Bytes::from(compressed));
            }
            ContentEncoding::Identity => message.body_mut().set_text(body),
        }
        debug!(previous_len, len = message.body().len(), "edited data applied");

        Ok(())
    }

    fn body_text(&self, message: &M) -> Result<String, CodecError> {
        match content_encoding(message.header()) {
            ContentEncoding::Gzip => Self::decode_gzip(&self.compression, message.body()).map_err(|e| {
                error!(cause = %e, "failed to decode gzip body");
                CodecError::unreadable_body(e)
            }),
            ContentEncoding::Identity => Ok(message.body().text()),
        }
    }

    /// Decompresses the body, then decodes it with its declared charset.
    fn decode_gzip(compression: &C, body: &M::Body) -> io::Result<String> {
        let decoded = compression.decompress(&body.bytes())?;
        Ok(charset::decode(&decoded, body.charset().as_deref()))
    }
}

fn content_encoding<H: HeaderUnit>(header: &H) -> ContentEncoding {
    ContentEncoding::detect(header.field(CONTENT_ENCODING.as_str()).as_deref())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::{Compression, GzBuilder};

    use super::*;
    use crate::codec::compression::MockCompressionCodec;
    use crate::protocol::{
        HEADER_TERMINATOR, HttpBody, HttpMessage, MalformedHeaderError, MockBodyUnit, MockHeaderUnit, RequestHeader,
        RequestMessage, ResponseHeader, ResponseMessage,
    };

    const HEADER: &str = "Start Line\r\nHeader1: A\r\nHeader2: B";
    const HEADER_LINEFEEDS: &str = "Start Line\nHeader1: A\nHeader2: B";

    const BODY: &str = "Body\r\n 123\n ABC";
    const OTHER_BODY: &str = "Other Body\r\n 123\n ABC";

    type MockMessage = HttpMessage<MockHeaderUnit, MockBodyUnit>;

    fn gzip(value: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(value).unwrap();
        encoder.finish().unwrap()
    }

    fn mock_header(content_encoding: Option<&'static str>) -> MockHeaderUnit {
        let mut header = MockHeaderUnit::new();
        header.expect_raw_text().returning(|| format!("{HEADER}{HEADER_TERMINATOR}"));
        header
            .expect_field()
            .withf(|name| name == CONTENT_ENCODING.as_str())
            .returning(move |_| content_encoding.map(str::to_owned));
        header
    }

    fn bound(header: MockHeaderUnit, body: MockBodyUnit) -> MessageTextCodec<MockMessage> {
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(HttpMessage::new(header, body)));
        codec
    }

    #[test]
    fn should_render_empty_text_without_message() {
        let codec = MessageTextCodec::<MockMessage>::new();

        assert_eq!(codec.render().unwrap(), "");
        assert!(codec.message().is_none());
    }

    #[test]
    fn should_render_header_and_body() {
        let mut body = MockBodyUnit::new();
        body.expect_text().return_const(BODY.to_owned());
        let codec = bound(mock_header(None), body);

        let data = codec.render().unwrap();

        assert_eq!(data, format!("{HEADER_LINEFEEDS}\n\n{BODY}"));
    }

    #[test]
    fn should_render_header_without_terminator() {
        let mut header = MockHeaderUnit::new();
        header.expect_raw_text().return_const(HEADER.to_owned());
        header.expect_field().returning(|_| None);
        let mut body = MockBodyUnit::new();
        body.expect_text().return_const(String::new());
        let codec = bound(header, body);

        assert_eq!(codec.render().unwrap(), format!("{HEADER_LINEFEEDS}\n\n"));
    }

    #[test]
    fn should_render_gzip_decoded_body() {
        let mut body = MockBodyUnit::new();
        body.expect_charset().returning(|| Some("UTF-8".to_owned()));
        body.expect_bytes().returning(|| Bytes::from(gzip(BODY.as_bytes())));
        body.expect_text().never();
        let codec = bound(mock_header(Some("gzip")), body);

        let data = codec.render().unwrap();

        assert!(data.ends_with(BODY));
        assert_eq!(data, format!("{HEADER_LINEFEEDS}\n\n{BODY}"));
    }

    #[test]
    fn should_render_other_encoding_untouched() {
        let mut body = MockBodyUnit::new();
        body.expect_text().return_const(BODY.to_owned());
        body.expect_bytes().never();
        let codec = bound(mock_header(Some("br")), body);

        assert!(codec.render().unwrap().ends_with(BODY));
    }

    #[test]
    fn should_fail_render_with_corrupt_gzip_body() {
        let mut body = MockBodyUnit::new();
        body.expect_charset().returning(|| None);
        body.expect_bytes().returning(|| Bytes::from_static(BODY.as_bytes()));
        let codec = bound(mock_header(Some("gzip")), body);

        let result = codec.render();

        assert!(matches!(result, Err(CodecError::UnreadableBody { .. })));
    }

    #[test]
    fn should_not_apply_without_message() {
        let mut codec = MessageTextCodec::<MockMessage>::new();

        assert!(codec.apply(BODY).is_ok());
        assert!(codec.take_message().is_none());
    }

    #[test]
    fn should_apply_into_header_and_body() {
        // escaped line endings, so the header part holds no line break to convert
        let other_header = "Other Start Line\\r\\nHeader1: A\\r\\nHeader2: B";
        let data = format!("{other_header}\n\n{OTHER_BODY}");

        // the header unit offers no content length mutation, any call other than these panics
        let mut header = MockHeaderUnit::new();
        header.expect_set_raw_text().withf(move |raw| raw == other_header).times(1).returning(|_| Ok(()));
        header.expect_field().returning(|_| None);
        let mut body = MockBodyUnit::new();
        body.expect_len().return_const(OTHER_BODY.len());
        body.expect_set_text().withf(|text| text == OTHER_BODY).times(1).return_const(());
        body.expect_set_bytes().never();
        let mut codec = bound(header, body);

        codec.apply(&data).unwrap();
    }

    #[test]
    fn should_reject_malformed_header() {
        let data = format!("Malformed Header\n\n{OTHER_BODY}");

        let mut header = MockHeaderUnit::new();
        header
            .expect_set_raw_text()
            .times(1)
            .returning(|raw| Err(MalformedHeaderError::invalid_header(format!("bad start line: {raw}"))));
        header.expect_field().never();
        let mut body = MockBodyUnit::new();
        body.expect_len().never();
        body.expect_set_text().never();
        body.expect_set_bytes().never();
        let mut codec = bound(header, body);

        let result = codec.apply(&data);

        let err = result.unwrap_err();
        assert!(err.is_invalid_edit());
        assert!(matches!(err, CodecError::InvalidEdit { source: MalformedHeaderError::InvalidHeader { .. } }));
    }

    #[test]
    fn should_apply_only_header_if_body_empty() {
        let mut header = MockHeaderUnit::new();
        header.expect_set_raw_text().withf(|raw| raw == HEADER).times(1).returning(|_| Ok(()));
        header.expect_field().returning(|_| None);
        let mut body = MockBodyUnit::new();
        body.expect_len().return_const(0_usize);
        body.expect_set_text().withf(str::is_empty).times(1).return_const(());
        let mut codec = bound(header, body);

        codec.apply(HEADER_LINEFEEDS).unwrap();
    }

    #[test]
    fn should_apply_gzip_encoded_body() {
        let data = format!("{HEADER_LINEFEEDS}\n\n{OTHER_BODY}");
        let encoded_body = gzip(OTHER_BODY.as_bytes());
        let encoded_len = encoded_body.len();

        let mut header = mock_header(Some("gzip"));
        header.expect_set_raw_text().withf(|raw| raw == HEADER).times(1).returning(|_| Ok(()));
        let mut body = MockBodyUnit::new();
        body.expect_charset().returning(|| Some("UTF-8".to_owned()));
        body.expect_bytes().returning(|| Bytes::from(gzip(BODY.as_bytes())));
        body.expect_len().return_const(encoded_len);
        body.expect_set_bytes().withf(move |bytes| *bytes == encoded_body).times(1).return_const(());
        body.expect_set_text().never();
        let mut codec = bound(header, body);

        codec.apply(&data).unwrap();
    }

    #[test]
    fn should_keep_unedited_gzip_body() {
        let data = format!("{HEADER_LINEFEEDS}\n\n{OTHER_BODY}");

        let mut header = mock_header(Some("gzip"));
        header.expect_set_raw_text().withf(|raw| raw == HEADER).times(1).returning(|_| Ok(()));
        let mut body = MockBodyUnit::new();
        body.expect_charset().returning(|| None);
        body.expect_bytes().returning(|| Bytes::from(gzip(OTHER_BODY.as_bytes())));
        body.expect_len().return_const(0_usize);
        body.expect_set_bytes().never();
        body.expect_set_text().never();
        let mut codec = bound(header, body);

        codec.apply(&data).unwrap();
    }

    #[test]
    fn should_surface_compression_failure() {
        let mut header = mock_header(Some("gzip"));
        header.expect_set_raw_text().returning(|_| Ok(()));
        let mut body = MockBodyUnit::new();
        body.expect_charset().returning(|| None);
        body.expect_len().return_const(0_usize);
        body.expect_set_bytes().never();
        body.expect_bytes().returning(|| Bytes::from_static(b"compressed"));
        let mut compression = MockCompressionCodec::new();
        compression.expect_decompress().returning(|_| Ok(BODY.as_bytes().to_vec()));
        compression.expect_compress().times(1).returning(|_| Err(io::Error::other("encoder gone")));

        let mut codec = MessageTextCodec::with_compression(compression);
        codec.set_message(Some(HttpMessage::new(header, body)));

        let result = codec.apply(&format!("{HEADER_LINEFEEDS}\n\n{OTHER_BODY}"));
        assert!(matches!(result, Err(CodecError::Compression { .. })));
    }

    #[test]
    fn should_round_trip_scenario() {
        let mut header = mock_header(None);
        header.expect_set_raw_text().withf(|raw| raw == HEADER).times(1).returning(|_| Ok(()));
        let mut body = MockBodyUnit::new();
        body.expect_text().return_const(BODY.to_owned());
        body.expect_len().return_const(BODY.len());
        body.expect_set_text().withf(|text| text == BODY).times(1).return_const(());
        let mut codec = bound(header, body);

        let data = codec.render().unwrap();
        assert_eq!(data, "Start Line\nHeader1: A\nHeader2: B\n\nBody\r\n 123\n ABC");

        codec.apply(&data).unwrap();
    }

    const REQUEST: &str = "POST /api/items?page=2 HTTP/1.1\r\nHost: localhost:8080\r\nContent-Type: text/plain\r\nContent-Length: 15\r\n\r\n";

    #[test]
    fn round_trip_request() {
        let header = RequestHeader::parse(REQUEST).unwrap();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(RequestMessage::from_wire(header, BODY)));

        let data = codec.render().unwrap();
        assert_eq!(
            data,
            "POST /api/items?page=2 HTTP/1.1\nHost: localhost:8080\nContent-Type: text/plain\nContent-Length: 15\n\nBody\r\n 123\n ABC"
        );

        codec.apply(&data).unwrap();
        assert_eq!(codec.render().unwrap(), data);

        let (header, body) = codec.take_message().unwrap().into_parts();
        assert_eq!(header.raw_text(), REQUEST);
        assert_eq!(body.as_bytes(), BODY.as_bytes());
    }

    #[test]
    fn round_trip_binary_body_without_charset() {
        let header = RequestHeader::parse("PUT /upload HTTP/1.1\r\nContent-Type: application/octet-stream").unwrap();
        let bytes: Vec<u8> = (0..=u8::MAX).rev().collect();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(RequestMessage::from_wire(header, bytes.clone())));

        let data = codec.render().unwrap();
        codec.apply(&data).unwrap();

        assert_eq!(codec.message().unwrap().body().as_bytes(), &bytes[..]);
        assert_eq!(codec.render().unwrap(), data);
    }

    #[test]
    fn round_trip_line_feed_header() {
        let header = RequestHeader::parse("GET / HTTP/1.1\nHost: a\n\n").unwrap();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(RequestMessage::from_wire(header, "")));

        let data = codec.render().unwrap();
        assert_eq!(data, "GET / HTTP/1.1\nHost: a\n\n");

        codec.apply(&data).unwrap();
        assert_eq!(codec.message().unwrap().header().raw_text(), "GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    }

    #[test]
    fn round_trip_gzip_response() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=iso-8859-1\r\nContent-Encoding: gzip\r\n\r\n";
        let body = HttpBody::from_text("caf\u{e9} au lait\r\n", Some("iso-8859-1"));

        // produced by another encoder: other level, non zero mtime
        let mut encoder = GzBuilder::new().mtime(1_700_000_000).write(Vec::new(), Compression::fast());
        encoder.write_all(body.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_ne!(GzipCodec::default().compress(body.as_bytes()).unwrap(), compressed);

        let header = ResponseHeader::parse(raw).unwrap();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(ResponseMessage::from_wire(header, compressed.clone())));

        let data = codec.render().unwrap();
        assert!(data.ends_with("\n\ncaf\u{e9} au lait\r\n"));

        codec.apply(&data).unwrap();
        let message = codec.message().unwrap();
        assert_eq!(message.header().raw_text(), raw);
        assert_eq!(message.body().as_bytes(), &compressed[..]);

        // edit the body, it is written back gzip encoded in the declared charset
        codec.apply(&data.replace("lait", "lait chaud")).unwrap();
        let bytes = codec.message().unwrap().body().bytes();
        assert_eq!(bytes, gzip(b"caf\xe9 au lait chaud\r\n"));
        assert_eq!(GzipCodec::default().decompress(&bytes).unwrap(), b"caf\xe9 au lait chaud\r\n");
    }

    #[test]
    fn apply_follows_edited_content_encoding() {
        let header = RequestHeader::parse(REQUEST).unwrap();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(RequestMessage::from_wire(header, BODY)));

        let data = codec.render().unwrap().replace("Content-Length: 15\n", "Content-Encoding: gzip\n");
        codec.apply(&data).unwrap();

        let message = codec.message().unwrap();
        assert_eq!(message.header().field("content-encoding").as_deref(), Some("gzip"));
        assert_eq!(message.body().as_bytes(), &gzip(BODY.as_bytes())[..]);
        assert_eq!(codec.render().unwrap(), data);
    }

    #[test]
    fn apply_rejects_malformed_request() {
        let header = RequestHeader::parse(REQUEST).unwrap();
        let mut codec = MessageTextCodec::new();
        codec.set_message(Some(RequestMessage::from_wire(header, BODY)));

        let result = codec.apply(&format!("Malformed Header\n\n{OTHER_BODY}"));

        assert!(matches!(result, Err(CodecError::InvalidEdit { .. })));
        let message = codec.message().unwrap();
        assert_eq!(message.header().raw_text(), REQUEST);
        assert_eq!(message.body().as_bytes(), BODY.as_bytes());
    }

    #[test]
    fn apply_into_borrowed_message() {
        let header = RequestHeader::parse(REQUEST).unwrap();
        let mut message = RequestMessage::from_wire(header, BODY);

        let mut codec = MessageTextCodec::<&mut RequestMessage>::new();
        codec.set_message(Some(&mut message));
        codec.apply("GET / HTTP/1.0\nHost: localhost").unwrap();
        assert!(codec.set_message(None).is_some());

        assert_eq!(message.header().raw_text(), "GET / HTTP/1.0\r\nHost: localhost\r\n\r\n");
        assert!(message.body().is_empty());
    }
}
