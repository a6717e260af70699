//! Zlib compression and decompression for payload blocks.
//!
//! Every payload slot in a GEX or DAT file is one self-contained zlib
//! stream. Compression happens in a single pass into memory because the
//! container must know the packed byte count before any block data is
//! written; decompression streams, because the unpacked size is not
//! recorded anywhere.

use std::io::{self, Read, Write};

pub use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::{Error, Result};

/// Compress everything `src` yields into one in-memory zlib stream.
///
/// Returns [`Error::Zlib`] if the encoder fails to finalise the stream.
pub fn compress_to_vec<R: Read + ?Sized>(src: &mut R, level: Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    io::copy(src, &mut encoder)?;
    encoder.finish().map_err(|_| Error::Zlib)
}

/// Decompress one complete zlib stream from `src` into `dst`.
///
/// `src` must be bounded to exactly the packed byte length (for example
/// with [`Read::take`]); the decoder is drained afterwards so that every
/// packed byte is consumed even when the stream carries trailing bytes
/// past the DEFLATE terminator.
pub fn decompress_into<R: Read>(src: R, dst: &mut dyn Write) -> Result<()> {
    let mut decoder = ZlibDecoder::new(src);
    io::copy(&mut decoder, dst).map_err(|_| Error::Zlib)?;
    let mut rest = decoder.into_inner();
    io::copy(&mut rest, &mut io::sink())?;
    Ok(())
}
