//! Driver for the `warcf` tool: mode selection and the file plumbing around
//! [`warccodec::transcode`].
#[macro_use]
extern crate log;

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use thiserror::Error;
use warccodec::transcode::{self, TranscodeError};
use warccodec::{ContentMode, Dialect, DirSideFiles, ParseError, Record, RecordReader, SideFiles};

/// What a run of the tool does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Original WARC to compact form (`e`), with contents in side files for `es`.
    Encode { split: bool },
    /// Compact form back to original WARC (`d`), with contents from side files for `dm`.
    Decode { split: bool },
    /// Print one field of every response record (`l`, or `l<id>` to pick the field).
    List { field: u8 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode {0:?}; expected one of e, es, d, dm, l or l<field id>")]
pub struct ModeError(String);

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "e" => Mode::Encode { split: false },
            "es" => Mode::Encode { split: true },
            "d" => Mode::Decode { split: false },
            "dm" => Mode::Decode { split: true },
            "l" => Mode::List {
                field: transcode::listing_field(None),
            },
            _ => {
                let digits = s
                    .strip_prefix('l')
                    .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                    .ok_or_else(|| ModeError(s.to_owned()))?;
                // Too many digits for a u64 is just another out-of-range id
                Mode::List {
                    field: transcode::listing_field(digits.parse().ok()),
                }
            }
        };
        Ok(mode)
    }
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Where split-mode side files are written to or read from.
    pub side_dir: PathBuf,
    /// Show a spinner counting records while the input is parsed.
    pub progress: bool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to open input {}: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("unable to create output {}: {source}", .path.display())]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error("unable to create side file directory {}: {source}", .path.display())]
    SideDir { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Transcode(e.into())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Transcode(e.into())
    }
}

/// Run the tool once. Returns the number of records processed.
pub fn run(options: &Options) -> Result<usize, Error> {
    let input = open_input(&options.input)?;
    let output = create_output(&options.output)?;
    let progress = spinner(options.progress);

    match options.mode {
        Mode::Encode { split } => {
            let mut reader = RecordReader::new(input, Dialect::Original, ContentMode::Materialize);
            let records = read_records(&mut reader, &progress)?;
            let mut side_files = if split {
                fs::create_dir_all(&options.side_dir).map_err(|source| Error::SideDir {
                    path: options.side_dir.clone(),
                    source,
                })?;
                Some(DirSideFiles::new(&options.side_dir))
            } else {
                None
            };
            transcode::encode(&records, output, side_files_mut(&mut side_files))?;
            Ok(records.len())
        }
        Mode::Decode { split } => {
            let mut reader = RecordReader::new(input, Dialect::Compact, ContentMode::Skip);
            let records = read_records(&mut reader, &progress)?;
            let mut side_files = if split {
                Some(DirSideFiles::new(&options.side_dir))
            } else {
                None
            };
            let written = transcode::reconstruct(
                &records,
                reader.into_stream(),
                output,
                side_files_mut(&mut side_files),
            )?;
            Ok(written)
        }
        Mode::List { field } => {
            let mut reader = RecordReader::new(input, Dialect::Original, ContentMode::Skip);
            let records = read_records(&mut reader, &progress)?;
            let lines = transcode::list(&records, field, output)?;
            debug!("Listed {} values of field {}", lines, field);
            Ok(records.len())
        }
    }
}

fn side_files_mut(files: &mut Option<DirSideFiles>) -> Option<&mut dyn SideFiles> {
    files.as_mut().map(|f| f as &mut dyn SideFiles)
}

fn open_input(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::OpenInput {
            path: path.to_owned(),
            source,
        })
}

fn create_output(path: &Path) -> Result<BufWriter<File>, Error> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::CreateOutput {
            path: path.to_owned(),
            source,
        })
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner} {pos} records {elapsed}") {
        Ok(style) => bar.set_style(style),
        Err(e) => debug!("Falling back to default spinner style: {}", e),
    }
    bar
}

fn read_records<R: io::BufRead>(
    reader: &mut RecordReader<R>,
    progress: &ProgressBar,
) -> Result<Vec<Record>, ParseError> {
    let records = reader
        .records()
        .progress_with(progress.clone())
        .collect::<Result<Vec<_>, _>>();
    progress.finish_and_clear();
    records
}
