use std::io;
use thiserror::Error;

use crate::protocol::MalformedHeaderError;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The edited text was rejected, nothing in the message was changed.
    #[error("invalid message data: {source}")]
    InvalidEdit {
        #[from]
        source: MalformedHeaderError,
    },

    /// The body claims a content encoding its bytes can't be decoded with.
    #[error("unreadable body content: {source}")]
    UnreadableBody { source: io::Error },

    #[error("failed to compress body: {source}")]
    Compression { source: io::Error },
}

impl CodecError {
    pub fn unreadable_body<E: Into<io::Error>>(e: E) -> Self {
        Self::UnreadableBody { source: e.into() }
    }

    pub fn compression<E: Into<io::Error>>(e: E) -> Self {
        Self::Compression { source: e.into() }
    }

    /// Returns true if the error is caused by the edited text rather than by the message content.
    pub fn is_invalid_edit(&self) -> bool {
        matches!(self, Self::InvalidEdit { .. })
    }
}
