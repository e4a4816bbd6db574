//! Parsing complete WARC records out of a byte stream.
use std::io::BufRead;
use std::str;

use crate::header::{Field, FieldKind};
use crate::stream::{ByteStream, LineEnding};
use crate::{ParseError, VERSION_LINE};

/// A WARC record: its header fields in input order and its content block.
///
/// Fields are kept as an ordered list rather than a map because a header may repeat a field
/// and the exact order must survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<Field>,
    pub content: Vec<u8>,
}

impl Record {
    /// Get the raw value of the first field with the given id, or None if no such field exists.
    pub fn get_field_bytes(&self, id: u8) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_slice())
    }

    pub fn get_field(&self, kind: FieldKind) -> Option<&[u8]> {
        self.get_field_bytes(kind.id())
    }

    /// Get the record `Content-Length`.
    ///
    /// The first `Content-Length` field is authoritative; a record without one has no content.
    /// Surrounding whitespace (normally the single space after `:`) is ignored.
    pub fn content_length(&self) -> Result<u64, ParseError> {
        let value = match self.get_field(FieldKind::ContentLength) {
            None => return Ok(0),
            Some(value) => value,
        };

        str::from_utf8(value)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| ParseError::InvalidContentLength(value.to_vec()))
    }

    /// Return `true` if the record's `WARC-Type` is exactly `value`, including its leading space.
    ///
    /// ```
    /// # use warccodec::{Field, FieldKind, Record};
    /// let record = Record {
    ///     fields: vec![Field::new(FieldKind::Type, " response")],
    ///     content: vec![],
    /// };
    /// assert!(record.has_type(b" response"));
    /// assert!(!record.has_type(b"response"));
    /// ```
    pub fn has_type(&self, value: &[u8]) -> bool {
        self.fields
            .iter()
            .any(|field| field.id == FieldKind::Type.id() && field.value == value)
    }
}

/// The header syntax a [`RecordReader`] expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Standard WARC/1.0 records with named fields, each followed by its content block.
    Original,
    /// Compact record headers with one-byte field tags and no content. See
    /// [`transcode`](crate::transcode) for the layout.
    Compact,
}

/// What to do with the content block of an [`Original`](Dialect::Original) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Read the content into [`Record::content`].
    Materialize,
    /// Skip past the content, leaving [`Record::content`] empty.
    Skip,
}

/// Reads successive records from a [`ByteStream`].
///
/// Each call to [`read_record`](Self::read_record) runs the record state machine: version line,
/// header lines up to the empty line, then (for the original dialect) the content block and the
/// two CRLFs after it. Reading stops cleanly at the first line that is not `WARC/1.0`, which
/// is how the end of both the input and the compact header section are detected.
#[derive(Debug)]
pub struct RecordReader<R> {
    stream: ByteStream<R>,
    dialect: Dialect,
    content: ContentMode,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R, dialect: Dialect, content: ContentMode) -> Self {
        Self::from_stream(ByteStream::new(input), dialect, content)
    }

    pub fn from_stream(stream: ByteStream<R>, dialect: Dialect, content: ContentMode) -> Self {
        RecordReader {
            stream,
            dialect,
            content,
        }
    }

    /// Read the next record, returning `None` when there are no more.
    pub fn read_record(&mut self) -> Result<Option<Record>, ParseError> {
        if self.stream.at_end() {
            return Ok(None);
        }

        let (line, _) = self.stream.read_line()?;
        if line != VERSION_LINE {
            debug!(
                "End of records at non-version line {:?}",
                String::from_utf8_lossy(&line)
            );
            return Ok(None);
        }

        let mut record = Record::default();
        loop {
            let (line, _) = self.stream.read_line()?;
            // A header line cut off by the end of input is dropped with the rest of the record
            if line.is_empty() || self.stream.at_end() {
                break;
            }
            let field = match self.dialect {
                Dialect::Original => Field::parse_named(&line)?,
                Dialect::Compact => Field::parse_compact(&line)?,
            };
            record.fields.push(field);
        }

        match self.dialect {
            Dialect::Original => {
                self.read_content(&mut record)?;
                self.expect_crlf()?;
                self.expect_crlf()?;
            }
            // The header's empty line is followed by one more CRLF
            Dialect::Compact => self.expect_crlf()?,
        }

        trace!("Read record with {} fields", record.fields.len());
        Ok(Some(record))
    }

    fn read_content(&mut self, record: &mut Record) -> Result<(), ParseError> {
        let len = record.content_length()?;
        match self.content {
            ContentMode::Materialize => {
                record.content = self.stream.read_block(len)?;
                if record.content.len() as u64 != len {
                    warn!(
                        "Content not same size: expected {} bytes, read {}",
                        len,
                        record.content.len()
                    );
                }
            }
            ContentMode::Skip => self.stream.skip(len)?,
        }
        Ok(())
    }

    fn expect_crlf(&mut self) -> Result<(), ParseError> {
        let (line, ending) = self.stream.read_line()?;
        if ending != LineEnding::CrLf || !line.is_empty() {
            warn!(
                "Expected empty CRLF line after record, got {:?} ending {:?}",
                String::from_utf8_lossy(&line),
                ending
            );
        }
        Ok(())
    }

    pub fn at_end(&self) -> bool {
        self.stream.at_end()
    }

    /// Give back the underlying stream, positioned just after the last record read.
    pub fn into_stream(self) -> ByteStream<R> {
        self.stream
    }

    /// Iterate over the remaining records.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            reader: self,
            failed: false,
        }
    }
}

/// Iterator over the records of a [`RecordReader`], from [`RecordReader::records`].
///
/// Iteration ends after the last record or the first error.
#[derive(Debug)]
pub struct Records<'a, R> {
    reader: &'a mut RecordReader<R>,
    failed: bool,
}

impl<'a, R: BufRead> Iterator for Records<'a, R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
