//! Low-level wire primitives shared by all codecs.
//!
//! The GameMaker container family uses exactly two scalar shapes on the
//! wire: a 32-bit little-endian signed integer, and a length-prefixed
//! 8-bit string (32-bit LE byte length followed by that many raw bytes,
//! no terminator). Each function reads or writes exactly the bytes it
//! promises or returns an error - there is no partial-transfer ambiguity.

use std::fmt;
use std::io::{Read, Write};

use crate::{Error, Result};

/// A raw 8-bit string as stored in extension files.
///
/// GameMaker 8 tooling wrote names and paths in the system ANSI codepage
/// (usually Windows-1252). Bytes are kept verbatim so that reading and
/// re-writing a file reproduces it exactly; no encoding translation is
/// ever attempted. [`fmt::Display`] renders lossily for human output.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct AnsiString(Vec<u8>);

impl AnsiString {
    /// The empty string.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Raw bytes, exactly as on disk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The part after the last `/` or `\` separator (the whole string if
    /// there is none). Empty input gives an empty result.
    pub fn file_name(&self) -> AnsiString {
        let start = self
            .0
            .iter()
            .rposition(|&b| b == b'/' || b == b'\\')
            .map_or(0, |p| p + 1);
        AnsiString(self.0[start..].to_vec())
    }

    /// The extension of the file-name part, including the leading dot
    /// (`"a/b.chm"` gives `".chm"`). Empty if the name has no dot.
    pub fn extension(&self) -> AnsiString {
        let name = self.file_name();
        match name.0.iter().rposition(|&b| b == b'.') {
            Some(p) => AnsiString(name.0[p..].to_vec()),
            None => AnsiString::new(),
        }
    }
}

impl fmt::Display for AnsiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for AnsiString {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for AnsiString {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<Vec<u8>> for AnsiString {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

impl PartialEq<str> for AnsiString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for AnsiString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Read a little-endian `i32`.
#[inline]
pub(crate) fn le_i32<R: Read>(r: &mut R) -> Result<i32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(i32::from_le_bytes(b))
}

/// Write a little-endian `i32`.
#[inline]
pub(crate) fn write_le_i32<W: Write>(w: &mut W, v: i32) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Read an `i32` flag field as a boolean (any non-zero value is true).
#[inline]
pub(crate) fn le_bool<R: Read>(r: &mut R) -> Result<bool> {
    Ok(le_i32(r)? != 0)
}

/// Write a boolean as an `i32` flag field (1 or 0).
#[inline]
pub(crate) fn write_le_bool<W: Write>(w: &mut W, v: bool) -> Result<()> {
    write_le_i32(w, v as i32)
}

/// Read a length-prefixed 8-bit string.
pub(crate) fn ansi_str<R: Read>(r: &mut R) -> Result<AnsiString> {
    let len = le_i32(r)?;
    if len < 0 {
        return Err(Error::Parse("negative string length"));
    }
    let mut bytes = vec![0u8; len as usize];
    r.read_exact(&mut bytes)?;
    Ok(AnsiString(bytes))
}

/// Write a length-prefixed 8-bit string.
pub(crate) fn write_ansi_str<W: Write>(w: &mut W, s: &AnsiString) -> Result<()> {
    write_le_i32(w, s.len() as i32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Write `fallback` in place of `v` when `skip` is set.
///
/// Backs the optimize mode: fields the reader can recover from defaults
/// are replaced by those defaults on the wire.
#[inline]
pub(crate) fn write_le_i32_or<W: Write>(w: &mut W, skip: bool, fallback: i32, v: i32) -> Result<()> {
    write_le_i32(w, if skip { fallback } else { v })
}

/// String counterpart of [`write_le_i32_or`].
#[inline]
pub(crate) fn write_ansi_str_or<W: Write>(
    w: &mut W,
    skip: bool,
    fallback: &AnsiString,
    v: &AnsiString,
) -> Result<()> {
    write_ansi_str(w, if skip { fallback } else { v })
}
