//! Library-wide error and result types.

use std::fmt;
use std::io;

/// Result alias used throughout gexkit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; callers that need richer
/// context should wrap `Error` in their own type.
#[derive(Debug)]
pub enum Error {
    /// The GEX file signature did not match the expected value.
    BadSignature,
    /// An entry carried a revision whose dialect this entity does not speak.
    UnsupportedRevision(i32),
    /// A key seed was about to cross a cipher that was not in identity
    /// state.
    CipherState,
    /// A region required to be all-zero on disk was not (message names the
    /// region).
    Assertion(&'static str),
    /// A structural constraint was violated (message describes which one).
    Parse(&'static str),
    /// An underlying I/O operation failed.
    ///
    /// Backward seeks through an additive cipher surface here with
    /// [`std::io::ErrorKind::InvalidInput`].
    Io(io::Error),
    /// Zlib compression or decompression failed.
    Zlib,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadSignature => write!(f, "bad file signature"),
            Error::UnsupportedRevision(v) => write!(f, "unsupported entry revision: {v}"),
            Error::CipherState => write!(f, "cipher not in identity state at key handoff"),
            Error::Assertion(s) => write!(f, "expected zeroed region: {s}"),
            Error::Parse(s) => write!(f, "parse error: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Zlib => write!(f, "zlib (de)compression failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
