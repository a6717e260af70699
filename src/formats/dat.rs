//! DAT - the generic enciphered blob container.
//!
//! A DAT file is the GEX payload machinery without the metadata tree:
//! a key seed followed by framed zlib blocks, all through one cipher
//! run. The block count is not stored - whoever produced the file knows
//! how many slots it prepared, so the reader takes it as a parameter.
//!
//! ## Layout
//! ```text
//! keySeed:i32                 -- through a KryptStream in identity state
//! <cipher re-keyed with (keySeed, additive = false)>
//! payloadRegion               -- framed zlib blocks
//! ```

use std::io::{Read, Write};

use log::debug;

use crate::Result;
use crate::compression::zlib::Compression;
use crate::crypto::gmkrypt::{IDENTITY_SEED, KryptStream};
use crate::payload::{read_block_to_vec, write_block};
use crate::utils::{le_i32, write_le_i32};

/// Read `count` payload blocks from a DAT stream.
pub fn read<R: Read>(r: &mut R, count: usize) -> Result<Vec<Vec<u8>>> {
    let mut krypt = KryptStream::decode(r, IDENTITY_SEED, false);
    let seed = le_i32(&mut krypt)?;
    krypt.init_state(seed, false);
    debug!("reading {count} blob blocks (seed {seed})");
    (0..count).map(|_| read_block_to_vec(&mut krypt)).collect()
}

/// Write `blocks` as a DAT stream enciphered with `seed`.
pub fn write<W: Write>(
    w: &mut W,
    seed: i32,
    blocks: &[Vec<u8>],
    level: Compression,
) -> Result<()> {
    let mut krypt = KryptStream::encode(w, IDENTITY_SEED, false);
    write_le_i32(&mut krypt, seed)?;
    krypt.init_state(seed, false);
    debug!("writing {} blob blocks (seed {seed})", blocks.len());
    for block in blocks {
        write_block(&mut krypt, &mut block.as_slice(), level)?;
    }
    krypt.flush()?;
    Ok(())
}
