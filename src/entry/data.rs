//! Data entries - one per embedded file - and their content variants.
//!
//! A data entry names one payload slot of the container (a DLL, a GML
//! script collection, a help file, an arbitrary asset) and carries the
//! metadata describing how GameMaker should treat it.
//!
//! ## Layout (dialect 700)
//! ```text
//! revision:i32  name:str  source:str  kind:i32  contentBody(kind)
//! ```
//!
//! `source` is a hint - the path or URL the file was imported from; the
//! payload callbacks of [`crate::formats::gex`] may rewrite it while
//! resolving bytes.
//!
//! ## Content bodies
//!
//! | Kind | Variant | Body |
//! |------|---------|------|
//! | 1 | native library | initFn:str exitFn:str functions constants |
//! | 2 | script library | same, with script-flavored functions |
//! | 3 | binary plugin  | `"" "" 0:i32 0:i32` (asserted on read) |
//! | 4 | simple binary  | `"" "" 0:i32 0:i32` (asserted on read) |
//!
//! GM4HTML5 emitted a few out-of-range tags; on read, 0 and 5 are taken
//! as a native library and 6 as a simple binary. Writing always emits
//! 1..=4.

use std::io::{Read, Write};

use crate::entry::constant::Constant;
use crate::entry::function::{NativeFunction, ScriptFunction};
use crate::entry::{REVISION_DEFAULT, expect_revision, list_len, write_revision};
use crate::utils::{AnsiString, ansi_str, le_i32, write_ansi_str, write_ansi_str_or, write_le_i32};
use crate::{Error, Result};

/// Wire tag of a content variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ContentKind {
    NativeLibrary = 1,
    ScriptLibrary = 2,
    Plugin = 3,
    Binary = 4,
}

impl ContentKind {
    /// Decode a wire tag, coercing the GM4HTML5 out-of-range values.
    pub fn from_wire(v: i32) -> Result<Self> {
        match v {
            0 | 1 | 5 => Ok(Self::NativeLibrary),
            2 => Ok(Self::ScriptLibrary),
            3 => Ok(Self::Plugin),
            4 | 6 => Ok(Self::Binary),
            _ => Err(Error::Parse("unknown data entry kind")),
        }
    }
}

/// Metadata of a native (DLL) library.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NativeLibrary {
    /// Function called right after the library loads; empty for none.
    pub init_fn: AnsiString,
    /// Function called before the library unloads; empty for none.
    pub exit_fn: AnsiString,
    pub functions: Vec<NativeFunction>,
    pub constants: Vec<Constant>,
}

/// Metadata of a GML script library.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScriptLibrary {
    /// Script called right after import; empty for none.
    pub init_fn: AnsiString,
    /// Script called on teardown; empty for none.
    pub exit_fn: AnsiString,
    pub functions: Vec<ScriptFunction>,
    pub constants: Vec<Constant>,
}

/// What a data entry's payload *is*, with the metadata that flavor
/// carries. Plugins and plain binaries carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    NativeLibrary(NativeLibrary),
    ScriptLibrary(ScriptLibrary),
    Plugin,
    Binary,
}

impl Content {
    /// The wire tag this variant serializes as.
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::NativeLibrary(_) => ContentKind::NativeLibrary,
            Content::ScriptLibrary(_) => ContentKind::ScriptLibrary,
            Content::Plugin => ContentKind::Plugin,
            Content::Binary => ContentKind::Binary,
        }
    }
}

/// One embedded file: its name, provenance hint, and content metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    /// File name as shown in the IDE.
    pub name: AnsiString,
    /// Where the file came from (path or URL); advisory only.
    pub source: AnsiString,
    pub content: Content,
}

impl DataEntry {
    /// Parse a full data entry (revision prefix included) from `r`.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_revision(r, REVISION_DEFAULT)?;
        let name = ansi_str(r)?;
        let source = ansi_str(r)?;
        let kind = ContentKind::from_wire(le_i32(r)?)?;
        let content = match kind {
            ContentKind::NativeLibrary => {
                let (init_fn, exit_fn) = library_header(r)?;
                let functions = parse_list(r, NativeFunction::parse)?;
                let constants = parse_list(r, Constant::parse)?;
                Content::NativeLibrary(NativeLibrary {
                    init_fn,
                    exit_fn,
                    functions,
                    constants,
                })
            }
            ContentKind::ScriptLibrary => {
                let (init_fn, exit_fn) = library_header(r)?;
                let functions = parse_list(r, ScriptFunction::parse)?;
                let constants = parse_list(r, Constant::parse)?;
                Content::ScriptLibrary(ScriptLibrary {
                    init_fn,
                    exit_fn,
                    functions,
                    constants,
                })
            }
            ContentKind::Plugin => {
                binary_body(r)?;
                Content::Plugin
            }
            ContentKind::Binary => {
                binary_body(r)?;
                Content::Binary
            }
        };
        Ok(Self {
            name,
            source,
            content,
        })
    }

    /// Write a full data entry to `w`.
    ///
    /// Optimize mode blanks the source hint - it is advisory and the
    /// reader defaults it to empty.
    pub fn write_to<W: Write>(&self, w: &mut W, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_DEFAULT, optimize)?;
        write_ansi_str(w, &self.name)?;
        write_ansi_str_or(w, optimize, &AnsiString::new(), &self.source)?;
        write_le_i32(w, self.content.kind() as i32)?;
        match &self.content {
            Content::NativeLibrary(lib) => {
                write_ansi_str(w, &lib.init_fn)?;
                write_ansi_str(w, &lib.exit_fn)?;
                write_list(w, &lib.functions, |w, f| f.write_to(w, optimize))?;
                write_list(w, &lib.constants, |w, c| c.write_to(w, optimize))
            }
            Content::ScriptLibrary(lib) => {
                write_ansi_str(w, &lib.init_fn)?;
                write_ansi_str(w, &lib.exit_fn)?;
                write_list(w, &lib.functions, |w, f| f.write_to(w, optimize))?;
                write_list(w, &lib.constants, |w, c| c.write_to(w, optimize))
            }
            Content::Plugin | Content::Binary => {
                write_ansi_str(w, &AnsiString::new())?;
                write_ansi_str(w, &AnsiString::new())?;
                write_le_i32(w, 0)?;
                write_le_i32(w, 0)
            }
        }
    }
}

fn library_header<R: Read>(r: &mut R) -> Result<(AnsiString, AnsiString)> {
    Ok((ansi_str(r)?, ansi_str(r)?))
}

/// The four fixed fields of a metadata-free content body, all required
/// to be empty/zero on disk.
fn binary_body<R: Read>(r: &mut R) -> Result<()> {
    let init_fn = ansi_str(r)?;
    let exit_fn = ansi_str(r)?;
    let func_count = le_i32(r)?;
    let const_count = le_i32(r)?;
    if !init_fn.is_empty() || !exit_fn.is_empty() || func_count != 0 || const_count != 0 {
        return Err(Error::Assertion("binary content metadata"));
    }
    Ok(())
}

fn parse_list<R: Read, T>(r: &mut R, parse: fn(&mut R) -> Result<T>) -> Result<Vec<T>> {
    let n = list_len(r)?;
    let mut items = Vec::with_capacity(n.min(4096));
    for _ in 0..n {
        items.push(parse(r)?);
    }
    Ok(items)
}

fn write_list<W: Write, T>(
    w: &mut W,
    items: &[T],
    mut write: impl FnMut(&mut W, &T) -> Result<()>,
) -> Result<()> {
    write_le_i32(w, items.len() as i32)?;
    for item in items {
        write(w, item)?;
    }
    Ok(())
}
