use micro_http_editor::codec::{CompressionCodec, GzipCodec, MessageTextCodec};
use micro_http_editor::protocol::{BodyUnit, EditableMessage, HeaderUnit, ResponseHeader, ResponseMessage};

use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const HEADER: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=iso-8859-1\r\nContent-Encoding: gzip\r\n\r\n";

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let gzip = GzipCodec::default();
    let header = match ResponseHeader::parse(HEADER) {
        Ok(header) => header,
        Err(e) => {
            error!(cause = %e, "invalid response header");
            return;
        }
    };
    let body = gzip.compress(b"Caf\xe9 cr\xe8me\r\n").expect("compress in memory");

    let mut codec = MessageTextCodec::with_compression(gzip);
    codec.set_message(Some(ResponseMessage::from_wire(header, body)));

    let text = match codec.render() {
        Ok(text) => text,
        Err(e) => {
            error!(cause = %e, "can't render message");
            return;
        }
    };
    info!(%text, "rendered");

    let edited = text.replace("200 OK", "201 Created").replace("cr\u{e8}me", "br\u{fb}l\u{e9}e");
    if let Err(e) = codec.apply(&edited) {
        error!(cause = %e, "edit rejected");
        return;
    }

    if let Err(e) = codec.apply("HTTP/1.1 200\nBroken Header Line\n\nignored") {
        info!(cause = %e, invalid_edit = e.is_invalid_edit(), "second edit rejected, message unchanged");
    }

    if let Some(message) = codec.message() {
        info!(header = %message.header().raw_text().escape_debug(), body_len = message.body().len(), "applied");
    }
}
