//! GEX - the compiled extension package.
//!
//! A GEX is the metadata tree plus every embedded file, enciphered and
//! compressed into a single installable unit.
//!
//! ## Layout
//! ```text
//! signature:i32 = 1234321     -- raw, outside the cipher
//! <everything below through one KryptStream, initially identity>
//! package                     -- entry, revision 701; re-keys the cipher
//!                             -- in place right after its key seed
//! payloadRegion               -- framed zlib blocks, same cipher state
//! ```
//!
//! The cipher state that the package entry establishes carries straight
//! into the payload region - the whole body after the signature is one
//! uninterrupted cipher run, re-keyed once, 8 bytes in.
//!
//! ## Slot order
//!
//! Payload blocks follow the metadata walk: the help file first (when
//! the prototype names one), then each data entry in manifest order.
//! Resolution of every slot's bytes is delegated to the caller through
//! [`PayloadProvider`] / [`PayloadConsumer`]; a `None` answer skips the
//! slot (zero-length block on write, seek-past on read).

use std::io::{Read, Seek, Write};

use log::debug;

use crate::compression::zlib::Compression;
use crate::crypto::gmkrypt::{IDENTITY_SEED, KryptStream};
use crate::entry::package::Package;
use crate::payload::{
    PayloadConsumer, PayloadProvider, read_block, skip_block, walk_slots, write_block,
    write_skipped_block,
};
use crate::utils::{le_i32, write_le_i32};
use crate::{Error, Result};

/// Little-endian signature opening every GEX file.
pub const SIGNATURE: i32 = 1_234_321;

/// Read a package file from `r`, streaming payload bytes to `consumer`.
///
/// Source hints in the returned package reflect any rewrites the
/// consumer made while placing bytes.
pub fn read<R: Read + Seek>(r: &mut R, consumer: &mut dyn PayloadConsumer) -> Result<Package> {
    if le_i32(r)? != SIGNATURE {
        return Err(Error::BadSignature);
    }
    let mut krypt = KryptStream::decode(r, IDENTITY_SEED, false);
    let mut package = Package::parse(&mut krypt)?;
    debug!(
        "read package \"{}\" (seed {}, {} files)",
        package.prototype.name,
        package.seed,
        package.prototype.files.len()
    );
    walk_slots(&mut package.prototype, |name, source| -> Result<()> {
        match consumer.create(&name, source)? {
            Some(mut sink) => read_block(&mut krypt, sink.as_mut()),
            None => {
                debug!("skipping payload slot \"{name}\"");
                skip_block(&mut krypt)
            }
        }
    })?;
    Ok(package)
}

/// Write a package file to `w`, pulling payload bytes from `provider`.
///
/// The payload-slot list assembled during the metadata walk is private
/// to this call and released before it returns.
pub fn write<W: Write>(
    w: &mut W,
    package: &mut Package,
    provider: &mut dyn PayloadProvider,
    optimize: bool,
    level: Compression,
) -> Result<()> {
    write_le_i32(w, SIGNATURE)?;
    let mut krypt = KryptStream::encode(w, IDENTITY_SEED, false);
    package.write_to(&mut krypt, optimize)?;

    let mut slots: Vec<Option<Box<dyn Read>>> = Vec::new();
    walk_slots(&mut package.prototype, |name, source| -> Result<()> {
        slots.push(provider.open(&name, source)?);
        Ok(())
    })?;
    debug!(
        "writing package \"{}\": {} payload slots",
        package.prototype.name,
        slots.len()
    );
    for slot in &mut slots {
        match slot {
            Some(src) => write_block(&mut krypt, src.as_mut(), level)?,
            None => write_skipped_block(&mut krypt)?,
        }
    }
    krypt.flush()?;
    Ok(())
}
