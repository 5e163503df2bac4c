//! Error kinds surfaced by the codecs and the pipeline driver.
//!
//! A plain `Copy` enum, the way the lower layers use small error enums
//! rather than `anyhow`/`thiserror` (those are reserved for the CLI-parsing
//! boundary, see `cli::args`).

use std::fmt;
use std::io;

/// A codec- or pipeline-level failure. Never unwinds past a codec call —
/// every error path returns this value instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A read from the input descriptor failed.
    Read,
    /// A write to the output descriptor failed.
    Write,
    /// The compressed stream is malformed (bad header, truncated body, code
    /// out of range, padding mismatch, ...).
    Format,
    /// No registered algorithm's `probe` matched the input prefix.
    UnrecognizedFormat,
    /// The operand names an algorithm this build does not support.
    UnimplementedFormat,
    /// A heap allocation failed. Fatal to the whole process.
    OutOfMemory,
    /// Output could not be opened in restore-name mode; a message has
    /// already been printed by the codec that discovered this.
    OpenFailure,
    /// Catch-all for conditions with no more specific kind.
    Unknown,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CodecError::Read => "read error",
            CodecError::Write => "write error",
            CodecError::Format => "not in a supported format",
            CodecError::UnrecognizedFormat => "unrecognized format",
            CodecError::UnimplementedFormat => "algorithm not compiled in",
            CodecError::OutOfMemory => "out of memory",
            CodecError::OpenFailure => "could not open output",
            CodecError::Unknown => "unknown error",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CodecError {}

impl From<io::Error> for CodecError {
    /// Read/write failures arrive from `std::io` call sites; the distinction
    /// between the two is made by the caller (which knows whether it was
    /// reading or writing), so this conversion picks the more common case
    /// and callers that need the other branch map explicitly instead of
    /// relying on `?`.
    fn from(_: io::Error) -> Self {
        CodecError::Read
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        for e in [
            CodecError::Read,
            CodecError::Write,
            CodecError::Format,
            CodecError::UnrecognizedFormat,
            CodecError::UnimplementedFormat,
            CodecError::OutOfMemory,
            CodecError::OpenFailure,
            CodecError::Unknown,
        ] {
            assert!(!e.to_string().is_empty());
        }
    }

    #[test]
    fn io_error_converts_to_read() {
        let io_err = io::Error::new(io::ErrorKind::Other, "x");
        let e: CodecError = io_err.into();
        assert_eq!(e, CodecError::Read);
    }
}
