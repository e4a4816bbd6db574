//! Moving record contents into per-record side files and back.
//!
//! In split mode the content of record `N` (counting from 0 in input order) is stored outside the
//! compact stream:
//!
//!  * An HTTP response (content starting with `HTTP/1.1 200` and containing a CRLF CRLF) is cut
//!    after the first CRLF CRLF. The header block, terminator included, goes to `h{N}` and the
//!    body, if not empty, to `c{N}{ext}` where `ext` comes from the HTTP `Content-Type`.
//!  * Anything else goes whole to `{N}{ext}`, where `ext` comes from the record's own
//!    `Content-Type` if it is a `resource` record and is empty otherwise.
//!
//! Both directions derive every name from the same inputs with the same functions, so a decoder
//! given the compact stream and the side files finds exactly what the encoder wrote.

use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use uncased::AsUncased;

use crate::extension::extension_for_content_type;
use crate::header::FieldKind;
use crate::record::Record;
use crate::transcode::TranscodeError;

/// Content starting with this is treated as an HTTP response with a separable body.
pub const HTTP_STATUS_PREFIX: &[u8] = b"HTTP/1.1 200";

const HTTP_HEADER_END: &[u8] = b"\r\n\r\n";

/// Headers beyond this many make `httparse` give up, and the line scan takes over.
const MAX_HTTP_HEADERS: usize = 64;

/// Storage for split-mode side files, addressed by name.
pub trait SideFiles {
    /// Store `data` under `name`, replacing anything already there.
    fn write(&mut self, name: &str, data: &[u8]) -> io::Result<()>;
    /// Fetch the data stored under `name`, or `None` if there is none.
    fn read(&mut self, name: &str) -> io::Result<Option<Vec<u8>>>;
}

impl<T: SideFiles + ?Sized> SideFiles for &mut T {
    fn write(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        (**self).write(name, data)
    }

    fn read(&mut self, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read(name)
    }
}

/// Side files kept as plain files in a directory.
#[derive(Debug, Clone)]
pub struct DirSideFiles {
    dir: PathBuf,
}

impl DirSideFiles {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DirSideFiles { dir: dir.into() }
    }
}

impl SideFiles for DirSideFiles {
    fn write(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        fs::write(self.dir.join(name), data)
    }

    fn read(&mut self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.dir.join(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Side files held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySideFiles(HashMap<String, Vec<u8>>);

impl MemorySideFiles {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Names of all stored files, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.0.remove(name)
    }
}

impl SideFiles for MemorySideFiles {
    fn write(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        self.0.insert(name.to_owned(), data.to_vec());
        Ok(())
    }

    fn read(&mut self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.0.get(name).cloned())
    }
}

/// An HTTP response cut into its header block (ending with CRLF CRLF) and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpParts<'a> {
    pub header: &'a [u8],
    pub body: &'a [u8],
}

/// Cut record content after its first CRLF CRLF if it is an HTTP response.
pub fn split_http(content: &[u8]) -> Option<HttpParts<'_>> {
    if !content.starts_with(HTTP_STATUS_PREFIX) {
        return None;
    }
    let end = content
        .windows(HTTP_HEADER_END.len())
        .position(|w| w == HTTP_HEADER_END)?
        + HTTP_HEADER_END.len();

    Some(HttpParts {
        header: &content[..end],
        body: &content[end..],
    })
}

/// Find the value of the `Content-Type` header (matched case-insensitively) in an HTTP header
/// block.
fn http_content_type(header: &[u8]) -> Option<Vec<u8>> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HTTP_HEADERS];
    let mut response = httparse::Response::new(&mut headers);
    match response.parse(header) {
        Ok(httparse::Status::Complete(_)) => {
            return response
                .headers
                .iter()
                .find(|h| h.name.as_uncased() == "content-type")
                .map(|h| h.value.to_vec());
        }
        Ok(httparse::Status::Partial) => debug!("HTTP header block is incomplete, scanning lines"),
        Err(e) => debug!("HTTP header block did not parse ({}), scanning lines", e),
    }

    header
        .split(|&b| b == b'\n')
        .skip(1)
        .find_map(|line| {
            let colon = line.iter().position(|&b| b == b':')?;
            let name = std::str::from_utf8(&line[..colon]).ok()?;
            if name.trim().as_uncased() != "content-type" {
                return None;
            }
            let value = &line[colon + 1..];
            Some(value.strip_suffix(b"\r").unwrap_or(value).to_vec())
        })
}

/// The body file extension for an HTTP header block.
pub fn http_body_extension(header: &[u8]) -> &'static str {
    http_content_type(header)
        .map(|value| extension_for_content_type(&value))
        .unwrap_or("")
}

/// The extension of the whole-content side file for a record.
///
/// Only `resource` records carry one, derived from their `Content-Type` field.
pub fn whole_content_extension(record: &Record) -> &'static str {
    if !record.has_type(b" resource") {
        return "";
    }
    record
        .get_field(FieldKind::ContentType)
        .map(extension_for_content_type)
        .unwrap_or("")
}

pub fn header_file_name(index: usize) -> String {
    format!("h{}", index)
}

pub fn body_file_name(index: usize, ext: &str) -> String {
    format!("c{}{}", index, ext)
}

pub fn whole_file_name(index: usize, ext: &str) -> String {
    format!("{}{}", index, ext)
}

/// Write the content of record `index` to side files.
///
/// Records declaring no content write nothing. A record that declares content but has none
/// (its input was cut short) still gets an empty whole-content file, so decoding finds it.
pub fn store_content<S: SideFiles + ?Sized>(
    record: &Record,
    index: usize,
    files: &mut S,
) -> Result<(), TranscodeError> {
    if record.content.is_empty() && record.content_length()? == 0 {
        return Ok(());
    }

    if let Some(parts) = split_http(&record.content) {
        let ext = http_body_extension(parts.header);
        trace!(
            "Record {} is HTTP: {} header bytes, {} body bytes as {:?}",
            index,
            parts.header.len(),
            parts.body.len(),
            ext
        );
        files.write(&header_file_name(index), parts.header)?;
        if !parts.body.is_empty() {
            files.write(&body_file_name(index, ext), parts.body)?;
        }
    } else {
        let name = whole_file_name(index, whole_content_extension(record));
        files.write(&name, &record.content)?;
    }
    Ok(())
}

/// Reassemble the content of record `index` from side files.
pub fn load_content<S: SideFiles + ?Sized>(
    record: &Record,
    index: usize,
    files: &mut S,
) -> Result<Vec<u8>, TranscodeError> {
    if let Some(mut content) = files.read(&header_file_name(index))? {
        if content.starts_with(HTTP_STATUS_PREFIX) {
            let name = body_file_name(index, http_body_extension(&content));
            // Empty bodies are never written
            if let Some(body) = files.read(&name)? {
                content.extend_from_slice(&body);
            }
            return Ok(content);
        }
        debug!(
            "Side file {} is not an HTTP header block; using whole content",
            header_file_name(index)
        );
    }

    let name = whole_file_name(index, whole_content_extension(record));
    files
        .read(&name)?
        .ok_or(TranscodeError::MissingSideFile(name))
}
