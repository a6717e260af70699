//! Payload slots: the callback surface and the block framing.
//!
//! The metadata tree describes *what* the embedded files are; their bytes
//! live in the payload region, an ordered run of blocks - one per slot -
//! each an independently zlib-compressed stream prefixed by its packed
//! byte length:
//!
//! ```text
//! packedLen:i32  packedBytes[packedLen]    -- packedBytes is raw zlib
//! ```
//!
//! The block count is not stored; it is implied by the slots the
//! container prepared while walking the metadata.
//!
//! Payload bytes are never owned by this crate. The caller supplies a
//! resolver - [`PayloadProvider`] when saving, [`PayloadConsumer`] when
//! loading - which is handed each slot's logical name and its source
//! hint, and answers with a byte source/sink or `None` to skip the slot.
//! Skipped slots are written as zero-length blocks and seeked past on
//! read. Both callbacks may rewrite the source hint to record where the
//! bytes actually came from or went.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::compression::zlib::{self, Compression};
use crate::utils::{AnsiString, le_i32, write_le_i32};
use crate::{Error, Result};

/// Resolves payload bytes while a GEX is being written.
pub trait PayloadProvider {
    /// Return the byte source for slot `name`, or `None` to skip it.
    ///
    /// `source` is the slot's current source hint; implementations may
    /// rewrite it.
    fn open(&mut self, name: &AnsiString, source: &mut AnsiString)
    -> Result<Option<Box<dyn Read>>>;
}

impl<F> PayloadProvider for F
where
    F: FnMut(&AnsiString, &mut AnsiString) -> Result<Option<Box<dyn Read>>>,
{
    fn open(
        &mut self,
        name: &AnsiString,
        source: &mut AnsiString,
    ) -> Result<Option<Box<dyn Read>>> {
        self(name, source)
    }
}

/// Receives payload bytes while a GEX is being read.
pub trait PayloadConsumer {
    /// Return the byte sink for slot `name`, or `None` to skip it.
    ///
    /// `source` is the slot's source hint as stored in the file;
    /// implementations may rewrite it to record where they placed the
    /// bytes.
    fn create(
        &mut self,
        name: &AnsiString,
        source: &mut AnsiString,
    ) -> Result<Option<Box<dyn Write>>>;
}

impl<F> PayloadConsumer for F
where
    F: FnMut(&AnsiString, &mut AnsiString) -> Result<Option<Box<dyn Write>>>,
{
    fn create(
        &mut self,
        name: &AnsiString,
        source: &mut AnsiString,
    ) -> Result<Option<Box<dyn Write>>> {
        self(name, source)
    }
}

/// Logical slot name: the basename of the source hint, or `fallback`
/// when the hint has none.
pub(crate) fn slot_name(source: &AnsiString, fallback: &AnsiString) -> AnsiString {
    let name = source.file_name();
    if name.is_empty() {
        fallback.clone()
    } else {
        name
    }
}

/// Compress everything `src` yields and emit it as one framed block.
pub(crate) fn write_block<W: Write>(
    w: &mut W,
    src: &mut dyn Read,
    level: Compression,
) -> Result<()> {
    let packed = zlib::compress_to_vec(src, level)?;
    write_le_i32(w, packed.len() as i32)?;
    w.write_all(&packed)?;
    Ok(())
}

/// Emit the zero-length block that stands in for a skipped slot.
pub(crate) fn write_skipped_block<W: Write>(w: &mut W) -> Result<()> {
    write_le_i32(w, 0)
}

/// Read one framed block, decompressing into `sink`.
///
/// A zero-length block (skipped slot) produces no bytes.
pub(crate) fn read_block<R: Read>(r: &mut R, sink: &mut dyn Write) -> Result<()> {
    let len = block_len(r)?;
    if len == 0 {
        return Ok(());
    }
    zlib::decompress_into(r.by_ref().take(len), sink)
}

/// Seek past one framed block without decompressing it.
///
/// The seek goes through `r` itself, so a cipher wrapper keeps its byte
/// counter in step.
pub(crate) fn skip_block<R: Read + Seek>(r: &mut R) -> Result<()> {
    let len = block_len(r)?;
    r.seek(SeekFrom::Current(len as i64))?;
    Ok(())
}

fn block_len<R: Read>(r: &mut R) -> Result<u64> {
    let len = le_i32(r)?;
    if len < 0 {
        return Err(Error::Parse("negative block length"));
    }
    Ok(len as u64)
}

/// Collect one payload slot's bytes into memory (test and tooling aid).
pub fn read_block_to_vec<R: Read>(r: &mut R) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    read_block(r, &mut out)?;
    Ok(out)
}

/// The help file plus every data entry, in payload-slot order, with the
/// logical name each slot resolves to. Visits the mutable source hints
/// so callbacks can rewrite them.
pub(crate) fn walk_slots<E, F>(
    prototype: &mut crate::entry::prototype::Prototype,
    mut visit: F,
) -> std::result::Result<(), E>
where
    F: FnMut(AnsiString, &mut AnsiString) -> std::result::Result<(), E>,
{
    if !prototype.help_file.is_empty() {
        let name = slot_name(&prototype.help_file, &prototype.temp_folder);
        visit(name, &mut prototype.help_file)?;
    }
    for entry in &mut prototype.files {
        let name = slot_name(&entry.source, &entry.name);
        visit(name, &mut entry.source)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::entry::data::{Content, DataEntry};
    use crate::entry::prototype::Prototype;

    #[test]
    fn block_framing_round_trip() {
        let data = b"bytes that will be framed";
        let mut region = Vec::new();
        write_block(&mut region, &mut Cursor::new(&data[..]), Compression::best()).unwrap();
        write_skipped_block(&mut region).unwrap();
        write_block(&mut region, &mut Cursor::new(&b"tail"[..]), Compression::best()).unwrap();

        let mut r = Cursor::new(&region);
        assert_eq!(read_block_to_vec(&mut r).unwrap(), data);
        assert_eq!(read_block_to_vec(&mut r).unwrap(), b""); // skipped
        assert_eq!(read_block_to_vec(&mut r).unwrap(), b"tail");
        assert_eq!(r.position(), region.len() as u64);
    }

    #[test]
    fn skip_lands_on_the_next_block() {
        let mut region = Vec::new();
        write_block(&mut region, &mut Cursor::new(&[1u8; 100][..]), Compression::default())
            .unwrap();
        write_block(&mut region, &mut Cursor::new(&b"after"[..]), Compression::default()).unwrap();

        let mut r = Cursor::new(&region);
        skip_block(&mut r).unwrap();
        assert_eq!(read_block_to_vec(&mut r).unwrap(), b"after");
    }

    #[test]
    fn walk_order_is_help_file_then_entries() {
        let mut proto = Prototype {
            help_file: r"docs\manual.chm".into(),
            temp_folder: "temp042".into(),
            files: vec![
                DataEntry {
                    name: "a.dll".into(),
                    source: r"C:\build\a.dll".into(),
                    content: Content::Binary,
                },
                DataEntry {
                    name: "b.bin".into(),
                    source: AnsiString::new(),
                    content: Content::Binary,
                },
            ],
            ..Prototype::default()
        };
        let mut seen = Vec::new();
        walk_slots::<(), _>(&mut proto, |name, _| {
            seen.push(name);
            Ok(())
        })
        .unwrap();
        // Basename, then basename, then fallback to the entry name.
        assert_eq!(seen, ["manual.chm", "a.dll", "b.bin"].map(AnsiString::from));
    }

    #[test]
    fn help_slot_name_falls_back_to_temp_folder() {
        let mut proto = Prototype {
            help_file: r"docs\".into(),
            temp_folder: "temp007".into(),
            ..Prototype::default()
        };
        let mut seen = Vec::new();
        walk_slots::<(), _>(&mut proto, |name, _| {
            seen.push(name);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, ["temp007"].map(AnsiString::from));
    }
}
