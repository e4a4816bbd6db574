//! Encoding WARC records to the compact form, decoding them back, and listing field values.
//!
//! ## Compact layout
//!
//! ```text
//! compact-file   = *compact-header CRLF *content
//! compact-header = "WARC/1.0" CRLF *compact-field CRLF CRLF
//! compact-field  = tag ":" value CRLF
//! tag            = OCTET            ; the field's registry id as a raw byte
//! value          = *OCTET           ; verbatim, including any leading space
//! ```
//!
//! All headers come first, in record order, followed by the content blocks of the same records
//! concatenated without separators. Each record's `Content-Length` field says how much of the
//! tail belongs to it. In split mode the contents are not in the stream at all but in
//! [side files](crate::split).
//!
//! The tag of a compact field is read back as the raw first byte of its line and only mapped to a
//! name through the registry when the original record is written out again.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::header::FieldKind;
use crate::record::{ContentMode, Dialect, Record, RecordReader};
use crate::split::{self, SideFiles};
use crate::stream::ByteStream;
use crate::{ParseError, VERSION_LINE};

/// The `WARC-Type` value, leading space included, of records that [`list`] reports on.
pub const RESPONSE_TYPE: &[u8] = b" response";

/// An error that stops an encode or decode run.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A split-mode side file needed to rebuild a record does not exist.
    #[error("side file {0} not found")]
    MissingSideFile(String),
    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Read every record from an original WARC stream.
pub fn read_original<R: BufRead>(
    input: R,
    content: ContentMode,
) -> Result<Vec<Record>, ParseError> {
    RecordReader::new(input, Dialect::Original, content)
        .records()
        .collect()
}

/// Write records in compact form.
///
/// With `split` set, record contents go to side files instead of the output stream.
pub fn encode<W: Write>(
    records: &[Record],
    mut out: W,
    mut split: Option<&mut dyn SideFiles>,
) -> Result<(), TranscodeError> {
    for record in records {
        out.write_all(VERSION_LINE)?;
        out.write_all(b"\r\n")?;
        for field in &record.fields {
            field.write_compact(&mut out)?;
        }
        out.write_all(b"\r\n\r\n")?;
    }
    out.write_all(b"\r\n")?;

    for (index, record) in records.iter().enumerate() {
        match split.as_deref_mut() {
            None => out.write_all(&record.content)?,
            Some(files) => split::store_content(record, index, files)?,
        }
    }
    out.flush()?;

    info!("records: {}", records.len());
    Ok(())
}

/// Rebuild an original WARC stream from a compact one.
///
/// Returns the number of records written.
pub fn decode<R: BufRead, W: Write>(
    input: R,
    out: W,
    split: Option<&mut dyn SideFiles>,
) -> Result<usize, TranscodeError> {
    let mut reader = RecordReader::new(input, Dialect::Compact, ContentMode::Skip);
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    reconstruct(&records, reader.into_stream(), out, split)
}

/// Write the original form of compact `records` whose headers have already been read.
///
/// `contents` is the rest of the compact stream, positioned at the first inline content block.
/// It is only read from when `split` is `None`, but it is always checked for end of input: once
/// it has run dry, or a record's content (inline or from side files) comes up short of its
/// `Content-Length`, no further records are written. Returns the number of records written.
pub fn reconstruct<R: BufRead, W: Write>(
    records: &[Record],
    mut contents: ByteStream<R>,
    mut out: W,
    mut split: Option<&mut dyn SideFiles>,
) -> Result<usize, TranscodeError> {
    let mut written = 0;
    for (index, record) in records.iter().enumerate() {
        out.write_all(VERSION_LINE)?;
        out.write_all(b"\r\n")?;
        for field in &record.fields {
            field.write_named(&mut out)?;
        }
        out.write_all(b"\r\n")?;

        let len = record.content_length()?;
        let mut short = false;
        if len > 0 {
            let content = match split.as_deref_mut() {
                None => contents.read_block(len)?,
                Some(files) => split::load_content(record, index, files)?,
            };
            if content.len() as u64 != len {
                warn!(
                    "Record {} content is {} bytes but Content-Length is {}",
                    index,
                    content.len(),
                    len
                );
                short = (content.len() as u64) < len;
            }
            out.write_all(&content)?;
        }
        written += 1;

        // Short content means the encoded input was truncated here, inline or split
        if short || contents.at_end() {
            if written < records.len() {
                warn!(
                    "Compact input ended after {} of {} records",
                    written,
                    records.len()
                );
            }
            break;
        }
        out.write_all(b"\r\n\r\n")?;
    }
    out.flush()?;

    info!("records: {}", records.len());
    Ok(written)
}

/// Write the value of field `id` of every `response` record as one line, without the value's
/// leading byte (conventionally the space after `:`).
///
/// Records lacking the field, or whose value is nothing but that leading byte, are skipped.
/// Returns the number of lines written.
pub fn list<W: Write>(records: &[Record], id: u8, mut out: W) -> io::Result<usize> {
    let mut lines = 0;
    for record in records {
        if !record.has_type(RESPONSE_TYPE) {
            continue;
        }
        match record.get_field_bytes(id) {
            Some(value) if value.len() > 1 => {
                out.write_all(&value[1..])?;
                out.write_all(b"\n")?;
                lines += 1;
            }
            _ => {}
        }
    }
    out.flush()?;

    info!("records: {}", records.len());
    Ok(lines)
}

/// The field id a listing should report for a requested id.
///
/// No request, or one past the end of the registry, means
/// [`WARC-Target-URI`](FieldKind::TargetURI).
pub fn listing_field(requested: Option<u64>) -> u8 {
    match requested {
        Some(id) if id <= u64::from(FieldKind::MAX_ID) => id as u8,
        _ => FieldKind::TargetURI.id(),
    }
}
