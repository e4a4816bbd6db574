//! WARC record header fields and the field registry.

use std::io::{self, Write};
use std::str;

pub use fieldkind::{lookup_id, lookup_name, FieldKind};

use crate::ParseError;

mod fieldkind;

/// A single header field.
///
/// The `id` is a [`FieldKind`] id. In a record read from an original WARC stream it was resolved
/// through the registry; in a record read from a compact stream it is the raw first byte of the
/// field line, taken as-is (see [`Field::parse_compact`]).
///
/// The `value` is everything after the first `:` of the header line, verbatim. In practice this
/// almost always begins with a single space (`WARC-Type: response` has value `b" response"`),
/// and consumers that compare or print values account for that leading byte explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: u8,
    pub value: Vec<u8>,
}

impl Field {
    pub fn new<V: Into<Vec<u8>>>(kind: FieldKind, value: V) -> Self {
        Field {
            id: kind.id(),
            value: value.into(),
        }
    }

    /// The registered kind of this field, if its id is assigned.
    pub fn kind(&self) -> Option<FieldKind> {
        FieldKind::from_id(self.id)
    }

    /// Parse a `Name:value` line from an original WARC header.
    ///
    /// The name must match a registry entry exactly; anything else is
    /// [`ParseError::UnknownField`].
    pub fn parse_named(line: &[u8]) -> Result<Field, ParseError> {
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or_else(|| ParseError::malformed_field(line))?;
        let name = &line[..colon];

        let kind = str::from_utf8(name)
            .ok()
            .and_then(FieldKind::from_name)
            .ok_or_else(|| ParseError::UnknownField(String::from_utf8_lossy(name).into_owned()))?;
        trace!("Got field {}: {:?}", kind.name(), &line[colon + 1..]);

        Ok(Field {
            id: kind.id(),
            value: line[colon + 1..].to_vec(),
        })
    }

    /// Parse a `tag:value` line from a compact header.
    ///
    /// The tag is the first byte of the line, used directly as the field id without consulting
    /// the registry; the value is everything after the first `:`. Whether the tag is registered
    /// is only checked when the field is written back out by name.
    pub fn parse_compact(line: &[u8]) -> Result<Field, ParseError> {
        let tag = *line.first().ok_or_else(|| ParseError::malformed_field(line))?;
        let colon = line
            .iter()
            .skip(1)
            .position(|&b| b == b':')
            .map(|i| i + 1)
            .ok_or_else(|| ParseError::malformed_field(line))?;

        Ok(Field {
            id: tag,
            value: line[colon + 1..].to_vec(),
        })
    }

    /// Write this field as `Name:value` CRLF.
    pub fn write_named<W: Write>(&self, mut out: W) -> Result<(), ParseError> {
        let kind = self.kind().ok_or(ParseError::UnknownTag(self.id))?;
        out.write_all(kind.name().as_bytes())?;
        out.write_all(b":")?;
        out.write_all(&self.value)?;
        out.write_all(b"\r\n")?;
        Ok(())
    }

    /// Write this field as a compact `tag:value` CRLF line, with the id as the one-byte tag.
    pub fn write_compact<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(&[self.id, b':'])?;
        out.write_all(&self.value)?;
        out.write_all(b"\r\n")
    }
}
