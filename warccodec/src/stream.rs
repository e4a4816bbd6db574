//! Sequential line and block access to an input byte source.

use std::io::{self, BufRead, Read};

/// How a line returned by [`ByteStream::read_line`] was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// The input ended before any line terminator.
    None,
    /// A bare LF.
    Lf,
    /// CR LF.
    CrLf,
}

/// A forward-only cursor over a `BufRead`.
///
/// Once any read runs past the end of the input the stream is marked as ended, and
/// [`at_end`](Self::at_end) stays `true` for the rest of its life. Nothing is retried.
#[derive(Debug)]
pub struct ByteStream<R> {
    input: R,
    ended: bool,
}

impl<R: BufRead> ByteStream<R> {
    pub fn new(input: R) -> Self {
        ByteStream {
            input,
            ended: false,
        }
    }

    /// Read up to and including the next LF, returning the line without its terminator.
    ///
    /// A CR immediately before the LF is also removed and the line is reported as
    /// [`LineEnding::CrLf`]. At end of input, whatever was read (possibly nothing) is returned
    /// with [`LineEnding::None`].
    pub fn read_line(&mut self) -> io::Result<(Vec<u8>, LineEnding)> {
        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;

        if line.last() != Some(&b'\n') {
            self.ended = true;
            return Ok((line, LineEnding::None));
        }
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
            Ok((line, LineEnding::CrLf))
        } else {
            Ok((line, LineEnding::Lf))
        }
    }

    /// Read exactly `n` bytes, or as many as remain if the input is shorter.
    ///
    /// A short read marks the stream as ended.
    pub fn read_block(&mut self, n: u64) -> io::Result<Vec<u8>> {
        let mut block = Vec::new();
        let got = (&mut self.input).take(n).read_to_end(&mut block)?;
        if (got as u64) < n {
            self.ended = true;
        }
        Ok(block)
    }

    /// Advance past `n` bytes without keeping them.
    pub fn skip(&mut self, n: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.input).take(n), &mut io::sink())?;
        if skipped < n {
            self.ended = true;
        }
        Ok(())
    }

    pub fn at_end(&self) -> bool {
        self.ended
    }
}
