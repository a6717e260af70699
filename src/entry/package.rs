//! The package - root entry of a GEX file.
//!
//! The package is the only entity speaking dialect 701, and the only one
//! that touches the cipher: its key seed is stored *inside* the
//! enciphered region, transferred while the surrounding
//! [`KryptStream`] still sits in identity state, after which that same
//! stream is re-keyed in place and the nested prototype follows under
//! the new table.
//!
//! ## Layout (dialect 701)
//! ```text
//! revision:i32            -- through the identity-state cipher
//! keySeed:i32             -- likewise
//! <cipher re-keyed with (keySeed, additive = false)>
//! prototype               -- full nested entry, dialect 700
//! ```

use std::io::{Read, Write};

use crate::crypto::gmkrypt::KryptStream;
use crate::entry::prototype::Prototype;
use crate::entry::{REVISION_GEX, expect_revision, write_revision};
use crate::utils::{le_i32, write_le_i32};
use crate::{Error, Result};

/// GEX root: the enciphering key seed plus the manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Package {
    /// Seed the payload cipher is keyed with.
    pub seed: i32,
    pub prototype: Prototype,
}

impl Package {
    /// Parse a full package entry from `r`, re-keying `r` in place.
    ///
    /// `r` must be freshly initialized to identity state; the seed would
    /// otherwise be deciphered through a live table
    /// ([`Error::CipherState`]).
    pub fn parse<S: Read>(r: &mut KryptStream<S>) -> Result<Self> {
        expect_revision(r, REVISION_GEX)?;
        if !r.is_identical() {
            return Err(Error::CipherState);
        }
        let seed = le_i32(r)?;
        r.init_state(seed, false);
        let prototype = Prototype::parse(r)?;
        Ok(Self { seed, prototype })
    }

    /// Write a full package entry to `w`, re-keying `w` in place.
    ///
    /// Same identity-state requirement as [`parse`](Self::parse).
    pub fn write_to<S: Write>(&self, w: &mut KryptStream<S>, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_GEX, optimize)?;
        if !w.is_identical() {
            return Err(Error::CipherState);
        }
        write_le_i32(w, self.seed)?;
        w.init_state(self.seed, false);
        self.prototype.write_to(w, optimize)
    }
}
