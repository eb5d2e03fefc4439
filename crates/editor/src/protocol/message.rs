use bytes::Bytes;
use http::header::CONTENT_TYPE;

use crate::protocol::charset::charset_of;
use crate::protocol::{BodyUnit, HeaderUnit, HttpBody, RequestHeader, ResponseHeader};

/// A message made of exactly one header unit and one body unit.
///
/// This is the capability set the text codec is written against, so the same codec serves
/// both requests and responses.
pub trait EditableMessage {
    type Header: HeaderUnit;
    type Body: BodyUnit;

    fn header(&self) -> &Self::Header;

    fn header_mut(&mut self) -> &mut Self::Header;

    fn body(&self) -> &Self::Body;

    fn body_mut(&mut self) -> &mut Self::Body;
}

impl<M: EditableMessage + ?Sized> EditableMessage for &mut M {
    type Header = M::Header;
    type Body = M::Body;

    fn header(&self) -> &Self::Header {
        (**self).header()
    }

    fn header_mut(&mut self) -> &mut Self::Header {
        (**self).header_mut()
    }

    fn body(&self) -> &Self::Body {
        (**self).body()
    }

    fn body_mut(&mut self) -> &mut Self::Body {
        (**self).body_mut()
    }
}

/// A header and its body.
#[derive(Debug)]
pub struct HttpMessage<H, B> {
    header: H,
    body: B,
}

pub type RequestMessage = HttpMessage<RequestHeader, HttpBody>;

pub type ResponseMessage = HttpMessage<ResponseHeader, HttpBody>;

impl<H, B> HttpMessage<H, B> {
    pub fn new(header: H, body: B) -> Self {
        Self { header, body }
    }

    pub fn into_parts(self) -> (H, B) {
        (self.header, self.body)
    }
}

impl<H: HeaderUnit> HttpMessage<H, HttpBody> {
    /// Creates a message from a parsed header and the body bytes as received.
    ///
    /// The body charset is taken from the header's `Content-Type` field.
    pub fn from_wire(header: H, body: impl Into<Bytes>) -> Self {
        let charset = header.field(CONTENT_TYPE.as_str()).as_deref().and_then(charset_of);
        Self { header, body: HttpBody::new(body).with_charset(charset) }
    }
}

impl<H: HeaderUnit, B: BodyUnit> EditableMessage for HttpMessage<H, B> {
    type Header = H;
    type Body = B;

    fn header(&self) -> &H {
        &self.header
    }

    fn header_mut(&mut self) -> &mut H {
        &mut self.header
    }

    fn body(&self) -> &B {
        &self.body
    }

    fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}
