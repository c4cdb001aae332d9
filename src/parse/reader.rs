use std::{borrow::Cow, io::Error as IoError};

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "async_tokio")]
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[cfg(feature = "async_std")]
use async_std::io::{prelude::BufReadExt, BufReader, Read};

use super::error::{ParseError, ParseResult};

pub(crate) struct FileReader<R> {
    buf: Vec<u8>,
    inner: BufReader<R>,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl<R: Read> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    /// Read the next line that is not a comment or blank.
    /// Returns `0` once the source is exhausted.
    pub(crate) fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf)?;

            if bytes == 0 || !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_tokio")]
impl<R: AsyncRead + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

            if bytes == 0 || !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_std")]
impl<R: Read + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

            if bytes == 0 || !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

impl<R> FileReader<R> {
    /// The current line without BOM, trailing comment, and surrounding whitespace.
    pub(crate) fn get_line(&self) -> Cow<'_, str> {
        let buf = self.buf.strip_prefix(&BOM).unwrap_or(&self.buf);

        match String::from_utf8_lossy(buf) {
            Cow::Borrowed(line) => Cow::Borrowed(trim_comment(line).trim()),
            Cow::Owned(line) => Cow::Owned(trim_comment(&line).trim().to_owned()),
        }
    }

    /// Parse the format version of the `osu file format vX` header.
    pub(crate) fn version(&self) -> ParseResult<u8> {
        const OSU_FILE_HEADER: &str = "osu file format v";

        let line = self.get_line();

        let idx = line
            .find(OSU_FILE_HEADER)
            .ok_or(ParseError::IncorrectFileHeader)?;

        line[idx + OSU_FILE_HEADER.len()..]
            .trim()
            .parse()
            .map_err(ParseError::InvalidVersion)
    }
}

const BOM: [u8; 3] = [239, 187, 191];

fn skip_line(line: &[u8]) -> bool {
    let line = line.strip_prefix(&BOM).unwrap_or(line);

    line.iter().all(u8::is_ascii_whitespace)
        || matches!(line[0], b' ' | b'_')
        || line.starts_with(b"//")
}

fn trim_comment(line: &str) -> &str {
    line.find("//").map_or(line, |idx| &line[..idx])
}
