//! Content encoding transcoders used by the text codec.

use std::io;
use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::trace;

/// A stateless, reentrant transcoder for one content encoding.
#[cfg_attr(test, mockall::automock)]
pub trait CompressionCodec {
    /// Encodes `data`.
    ///
    /// # Errors
    ///
    /// Returns the io error reported by the underlying encoder.
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    /// Decodes `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not a valid stream of this encoding.
    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>>;
}

/// Gzip transcoder.
#[derive(Debug, Clone, Copy)]
pub struct GzipCodec {
    level: Compression,
}

impl GzipCodec {
    pub fn new(level: Compression) -> Self {
        Self { level }
    }
}

impl Default for GzipCodec {
    fn default() -> Self {
        Self::new(Compression::best())
    }
}

impl CompressionCodec for GzipCodec {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), self.level);
        match encoder.write_all(data) {
            Ok(()) => encoder.finish(),
            Err(err) => {
                trace!(cause = %err, "failed to gzip encode");
                Err(err)
            }
        }
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoded = Vec::with_capacity(data.len() * 2);
        match GzDecoder::new(data).read_to_end(&mut decoded) {
            Ok(_) => Ok(decoded),
            Err(err) => {
                trace!(cause = %err, "failed to gzip decode");
                Err(err)
            }
        }
    }
}
