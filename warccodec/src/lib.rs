//! Tools for reading WARC (Web ARChive) files and transcoding them to and from a compact form.
//!
//! ## WARC structure
//!
//! A WARC file is a simple concatenation of records. Each record has a format similar to an HTTP
//! message, consisting of a version declaration, a number of header fields, and any number of bytes
//! of data:
//!
//! ```text
//! WARC/1.0
//! WARC-Type: response
//! WARC-Target-URI: http://example.com/
//! Content-Type: application/http;msgtype=response
//! Content-Length: 77
//!
//! HTTP/1.1 200 OK
//! Content-Type: text/html
//! Content-Length: 13
//!
//! <p>Hello!</p>
//!
//!
//! ```
//!
//! Every line of the header is CRLF-terminated, the header ends with an empty line, and the
//! `Content-Length` bytes of content are followed by two more CRLFs.
//!
//! ## Compact form
//!
//! The [`transcode`] module rewrites a stream of records into a compact stream where every header
//! field name is replaced by a one-byte registry tag and all record contents are moved after the
//! headers. Optionally, record contents are split out into separate side files (see [`split`]),
//! with HTTP responses further separated into their HTTP header and body and the body file named
//! with an extension matching its MIME type (see [`extension`]). Decoding reverses the process,
//! byte for byte.
//!
//! ## Library structure
//!
//! [`ByteStream`] wraps any `BufRead` with the line and block primitives the parsers need.
//! [`RecordReader`] parses records out of it in either the original or compact
//! [`Dialect`], and [`transcode`] holds the encode, decode and listing passes over a collection
//! of [`Record`]s.

#[macro_use]
extern crate log;

use thiserror::Error;

pub mod extension;
mod header;
pub mod record;
pub mod split;
mod stream;
#[cfg(test)]
mod tests;
pub mod transcode;

pub use header::{lookup_id, lookup_name, Field, FieldKind};
pub use record::{ContentMode, Dialect, Record, RecordReader};
pub use split::{DirSideFiles, MemorySideFiles, SideFiles};
pub use stream::{ByteStream, LineEnding};
pub use transcode::TranscodeError;

/// The only record version line this crate accepts.
pub const VERSION_LINE: &[u8] = b"WARC/1.0";

/// Reasons it may be impossible to parse a record.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A header field name is not in the field registry.
    ///
    /// The registry is authoritative: a name outside it means the input is corrupt or written
    /// in a WARC dialect this crate does not understand.
    #[error("unexpected field {0}")]
    UnknownField(String),
    /// A header line has no `:` separating name and value.
    ///
    /// The contained value is a UTF-8 interpretation of the offending line.
    #[error("header field is malformed (near \"{0}\")")]
    MalformedField(String),
    /// A `Content-Length` value is not a base-10 integer.
    #[error("Content-Length is not a valid integer (contained bytes {0:?})")]
    InvalidContentLength(Vec<u8>),
    /// A compact field tag does not correspond to any registered field.
    ///
    /// This is only detected when a decoded record is written out, so the records before it (and
    /// the version line and any earlier fields of the offending record) are already in the
    /// output when decoding stops.
    #[error("compact tag {0:#04x} is not a registered field id")]
    UnknownTag(u8),
    /// An I/O error occured while trying to read the input.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl std::cmp::PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        use ParseError::*;

        match (self, other) {
            (UnknownField(x), UnknownField(y)) | (MalformedField(x), MalformedField(y)) => x == y,
            (InvalidContentLength(x), InvalidContentLength(y)) => x == y,
            (UnknownTag(x), UnknownTag(y)) => x == y,
            (IoError(e1), IoError(e2)) => e1.kind() == e2.kind(),
            (_, _) => false,
        }
    }
}

impl ParseError {
    fn malformed_field(line: &[u8]) -> Self {
        ParseError::MalformedField(String::from_utf8_lossy(line).into_owned())
    }
}
