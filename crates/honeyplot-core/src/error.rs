//! Error taxonomy for the normalizer, the persisted store and the
//! aggregation engine.
//!
//! Only [`Error::MalformedRecord`] is recoverable: the normalizer collects it
//! per line and keeps going. Everything else propagates to the caller.
//! Numeric fields that are missing or not coercible never become errors at
//! all; the projection simply yields `None`.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A non-empty input line that is not a JSON object.
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A connection timestamp that is not a string in the fixed wire format.
    /// `value` is the string itself, or the JSON text of a non-string value.
    #[error("timestamp {value:?} does not match {format:?}")]
    TimestampFormat {
        value: String,
        format: &'static str,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// A connection event that carries no timestamp at all.
    #[error("{eventid} event has no {field:?} field")]
    MissingField {
        eventid: &'static str,
        field: &'static str,
    },

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted record document could not be decoded.
    #[error("cannot decode records from {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode records for {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the per-line error the normalizer recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}
