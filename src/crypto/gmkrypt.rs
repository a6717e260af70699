//! GMKrypt - the keyed byte-substitution cipher stream.
//!
//! ## Key schedule
//!
//! From a 32-bit signed seed, a permutation of the byte alphabet is built
//! by shuffling the identity table:
//!
//! ```text
//! a = (seed mod 250) + 6
//! b =  seed div 250
//! for i in 1..=10000:  j = ((i*a + b) mod 254) + 1;  swap table[j], table[j+1]
//! ```
//!
//! The decode direction uses the inverse permutation.
//!
//! ## Transform
//!
//! Deciphering substitutes first, then (in additive mode) subtracts the
//! byte's position within the cipher run; enciphering mirrors it - add the
//! position, then substitute through the forward table. Positions are
//! counted by a 64-bit counter that survives across calls and is reset
//! only by [`KryptStream::init_state`]. Two special cases:
//!
//! * When `(seed - 248) mod 250 == 0` and additive keying is off, the
//!   cipher is the identity and bytes pass through untouched (the counter
//!   still advances).
//! * The first byte after `init_state` is always transferred verbatim,
//!   whatever the state. The GEX container leans on this: the key seed is
//!   stored *inside* the enciphered region, read through an
//!   identity-configured run which is then re-keyed in place.

use std::io::{self, Read, Seek, SeekFrom, Write};

use log::trace;

/// Seed value whose table reduces to the identity permutation.
pub const IDENTITY_SEED: i32 = 248;

/// Transform direction fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encode,
    Decode,
}

/// A transparent enciphering (write-side) or deciphering (read-side)
/// wrapper around a byte stream.
///
/// The wrapper owns the inner stream; [`KryptStream::into_inner`] releases
/// it. [`init_state`](KryptStream::init_state) may be called at any point
/// to re-key in place - the GEX container does this mid-stream right
/// after transferring the key seed.
#[derive(Debug)]
pub struct KryptStream<S> {
    inner: S,
    direction: Direction,
    seed: i32,
    additive: bool,
    /// Bytes transferred since the last `init_state`.
    counter: u64,
    /// Encode table, or its inverse for the decode direction.
    table: [u8; 256],
    identical: bool,
}

impl<S> KryptStream<S> {
    /// Wrap `inner` for writing enciphered bytes.
    pub fn encode(inner: S, seed: i32, additive: bool) -> Self {
        Self::with_direction(inner, Direction::Encode, seed, additive)
    }

    /// Wrap `inner` for reading enciphered bytes.
    pub fn decode(inner: S, seed: i32, additive: bool) -> Self {
        Self::with_direction(inner, Direction::Decode, seed, additive)
    }

    fn with_direction(inner: S, direction: Direction, seed: i32, additive: bool) -> Self {
        let mut s = Self {
            inner,
            direction,
            seed,
            additive,
            counter: 0,
            table: IDENTITY_TABLE,
            identical: true,
        };
        s.init_state(seed, additive);
        s
    }

    /// Re-key the cipher in place.
    ///
    /// Resets the byte counter to zero, so the next byte transferred is
    /// exempt from transformation. Returns `true` when the new state is
    /// the identity (no table work is done in that case).
    pub fn init_state(&mut self, seed: i32, additive: bool) -> bool {
        self.seed = seed;
        self.additive = additive;
        self.counter = 0;
        self.identical = is_identical_crypto(seed, additive);
        if self.identical {
            return true;
        }
        trace!("cipher re-keyed (seed {seed}, additive {additive})");
        self.table = build_table(seed);
        if self.direction == Direction::Decode {
            self.table = invert(&self.table);
        }
        false
    }

    /// Whether the current state passes bytes through unmodified.
    pub fn is_identical(&self) -> bool {
        self.identical
    }

    /// Bytes transferred since the last [`init_state`](Self::init_state).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Current key seed.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Shared access to the inner stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the inner stream. Transferring bytes through it
    /// directly bypasses the cipher and its counter.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consume the wrapper, returning the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read> Read for KryptStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        debug_assert_eq!(self.direction, Direction::Decode);
        let n = self.inner.read(buf)?;
        let before = self.counter;
        self.counter += n as u64;
        if self.identical || n == 0 {
            return Ok(n);
        }
        // The first byte of a fresh cipher run stays verbatim.
        let start = usize::from(before == 0);
        for p in start..n {
            let mut c = self.table[buf[p] as usize];
            if self.additive {
                c = c.wrapping_sub((before + p as u64) as u8);
            }
            buf[p] = c;
        }
        Ok(n)
    }
}

impl<S: Write> Write for KryptStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        debug_assert_eq!(self.direction, Direction::Encode);
        if buf.is_empty() {
            return Ok(0);
        }
        if self.identical {
            let n = self.inner.write(buf)?;
            self.counter += n as u64;
            return Ok(n);
        }
        let mut chunk = [0u8; CHUNK];
        let take = buf.len().min(CHUNK);
        chunk[..take].copy_from_slice(&buf[..take]);
        let before = self.counter;
        let start = usize::from(before == 0);
        for p in start..take {
            let mut c = chunk[p];
            if self.additive {
                c = c.wrapping_add((before + p as u64) as u8);
            }
            chunk[p] = self.table[c as usize];
        }
        // Only the bytes the inner stream accepts advance the counter; the
        // caller retries the rest and they are re-transformed consistently.
        let n = self.inner.write(&chunk[..take])?;
        self.counter += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for KryptStream<S> {
    /// Seek the inner stream, keeping the byte counter in step.
    ///
    /// A seek that would place the counter before the start of a live
    /// additive cipher run fails with [`io::ErrorKind::InvalidInput`]:
    /// the additive transform is only well-defined going forward.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let current = self.inner.stream_position()?;
        let target = match pos {
            SeekFrom::Start(o) => o as i64,
            SeekFrom::Current(d) => current as i64 + d,
            SeekFrom::End(d) => self.inner.seek(SeekFrom::End(0))? as i64 + d,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to a negative position",
            ));
        }
        let new_counter = self.counter as i64 + (target - current as i64);
        if new_counter < 0 && self.additive && !self.identical {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before the start of an additive cipher run",
            ));
        }
        let n = self.inner.seek(SeekFrom::Start(target as u64))?;
        self.counter = new_counter as u64;
        Ok(n)
    }
}

/// `(seed - 248) mod 250 == 0` with additive keying off: the table
/// reduces to the identity and the cipher is a pass-through.
pub fn is_identical_crypto(seed: i32, additive: bool) -> bool {
    (seed - IDENTITY_SEED).rem_euclid(250) == 0 && !additive
}

const CHUNK: usize = 8192;

const IDENTITY_TABLE: [u8; 256] = {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = i as u8;
        i += 1;
    }
    t
};

/// Build the forward (encode) substitution table for `seed`.
fn build_table(seed: i32) -> [u8; 256] {
    let mut table = IDENTITY_TABLE;
    let a = (seed % 250 + 6) as i64;
    let b = (seed / 250) as i64;
    for i in 1..=10000i64 {
        let j = ((i * a + b).rem_euclid(254) + 1) as usize;
        table.swap(j, j + 1);
    }
    table
}

fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    for (i, &v) in table.iter().enumerate() {
        inv[v as usize] = i as u8;
    }
    inv
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SEEDS: [i32; 3] = [IDENTITY_SEED, 3328, 28927];

    fn encipher(data: &[u8], seed: i32, additive: bool) -> Vec<u8> {
        let mut w = KryptStream::encode(Vec::new(), seed, additive);
        w.write_all(data).unwrap();
        w.into_inner()
    }

    fn decipher(data: &[u8], seed: i32, additive: bool) -> Vec<u8> {
        let mut r = KryptStream::decode(Cursor::new(data), seed, additive);
        let mut out = Vec::new();
        r.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn table_is_a_permutation_and_inverts() {
        for seed in [3328, 28927, 1, 12345] {
            let enc = build_table(seed);
            let mut seen = [false; 256];
            for &v in &enc {
                assert!(!seen[v as usize], "duplicate in table for seed {seed}");
                seen[v as usize] = true;
            }
            let dec = invert(&enc);
            for b in 0..=255u8 {
                assert_eq!(dec[enc[b as usize] as usize], b);
            }
        }
    }

    #[test]
    fn identity_seeds_pass_through() {
        let data = [10u8, 20, 30, 40];
        for seed in [248, 498, -2, 248 + 250 * 4] {
            assert!(is_identical_crypto(seed, false));
            assert_eq!(encipher(&data, seed, false), data);
        }
        // Additive keying defeats the identity reduction.
        assert!(!is_identical_crypto(248, true));
    }

    #[test]
    fn first_byte_is_exempt() {
        let data = [10u8, 20, 30, 40];
        for seed in SEEDS {
            for additive in [false, true] {
                assert_eq!(encipher(&data, seed, additive)[0], 10);
                assert_eq!(decipher(&data, seed, additive)[0], 10);
            }
        }
    }

    #[test]
    fn substitution_follows_the_table() {
        let t = build_table(3328);
        let out = encipher(&[10, 20, 30, 40], 3328, false);
        assert_eq!(
            out,
            [10, t[20], t[30], t[40]],
            "non-additive encode is a plain table lookup past the first byte"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for seed in SEEDS {
            for additive in [false, true] {
                let enc = encipher(&data, seed, additive);
                assert_eq!(decipher(&enc, seed, additive), data);
            }
        }
    }

    #[test]
    fn split_writes_match_one_shot() {
        let data: Vec<u8> = (0..200u8).collect();
        let whole = encipher(&data, 28927, true);

        let mut w = KryptStream::encode(Vec::new(), 28927, true);
        for part in data.chunks(7) {
            w.write_all(part).unwrap();
        }
        assert_eq!(w.into_inner(), whole);
    }

    #[test]
    fn rekey_mid_stream_round_trips() {
        // The GEX shape: a few bytes under the identity state, then the
        // same stream is re-keyed and continues.
        let head = [1u8, 2, 3, 4];
        let body = b"payload bytes after the re-key";

        let mut w = KryptStream::encode(Vec::new(), IDENTITY_SEED, false);
        w.write_all(&head).unwrap();
        assert!(w.is_identical());
        w.init_state(3328, false);
        w.write_all(body).unwrap();
        let bytes = w.into_inner();
        assert_eq!(&bytes[..4], &head);
        assert_ne!(&bytes[4..], body.as_slice());

        let mut r = KryptStream::decode(Cursor::new(&bytes), IDENTITY_SEED, false);
        let mut got_head = [0u8; 4];
        r.read_exact(&mut got_head).unwrap();
        r.init_state(3328, false);
        let mut got_body = Vec::new();
        r.read_to_end(&mut got_body).unwrap();
        assert_eq!(got_head, head);
        assert_eq!(got_body, body);
    }

    #[test]
    fn counter_advances_even_when_identical() {
        let mut w = KryptStream::encode(Vec::new(), IDENTITY_SEED, false);
        w.write_all(&[0; 10]).unwrap();
        assert_eq!(w.counter(), 10);
    }

    #[test]
    fn additive_backward_seek_is_rejected() {
        let mut r = KryptStream::decode(Cursor::new(vec![0u8; 32]), IDENTITY_SEED, false);
        let mut buf = [0u8; 8];
        r.read_exact(&mut buf).unwrap();
        r.init_state(3328, true);

        // Forward stays legal, and backward while still inside the run.
        r.seek(SeekFrom::Current(4)).unwrap();
        r.seek(SeekFrom::Current(-2)).unwrap();
        assert_eq!(r.counter(), 2);

        // Crossing back over the re-key point would need a negative counter.
        let err = r.seek(SeekFrom::Current(-4)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn non_additive_backward_seek_is_allowed() {
        let mut r = KryptStream::decode(Cursor::new(vec![0u8; 16]), 3328, false);
        let mut buf = [0u8; 8];
        r.read_exact(&mut buf).unwrap();
        r.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(r.counter(), 0);
    }
}
