use std::{io::Error as IoError, num::ParseIntError};

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Some IO operation failed.
    #[error("IO error")]
    IoError(#[from] IoError),
    /// The initial data of an `.osu` file was incorrect.
    #[error("expected `osu file format v` at file begin")]
    IncorrectFileHeader,
    /// The file format version could not be parsed.
    #[error("invalid file format version")]
    InvalidVersion(#[source] ParseIntError),
    /// The `Mode` field of the `[General]` section was not one of `0`, `1`, `2`, or `3`.
    #[error("invalid mode `{0}`")]
    InvalidMode(String),
}
