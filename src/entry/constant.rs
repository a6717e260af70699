//! Constant descriptors.
//!
//! ## Layout (dialect 700)
//! ```text
//! revision:i32  name:str  value:str  hidden:i32
//! ```
//!
//! The value is stored as the literal text the IDE substitutes, not a
//! parsed number.

use std::io::{Read, Write};

use crate::Result;
use crate::entry::{REVISION_DEFAULT, expect_revision, write_revision};
use crate::utils::{AnsiString, ansi_str, le_bool, write_ansi_str, write_le_bool};

/// A named constant exported by a library.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: AnsiString,
    /// Literal replacement text, e.g. `"3.1415"` or `"'north'"`.
    pub value: AnsiString,
    pub hidden: bool,
}

impl Constant {
    /// Parse a full constant entry (revision prefix included) from `r`.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_revision(r, REVISION_DEFAULT)?;
        Ok(Self {
            name: ansi_str(r)?,
            value: ansi_str(r)?,
            hidden: le_bool(r)?,
        })
    }

    /// Write a full constant entry to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_DEFAULT, optimize)?;
        write_ansi_str(w, &self.name)?;
        write_ansi_str(w, &self.value)?;
        write_le_bool(w, self.hidden)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn round_trip() {
        let c = Constant {
            name: "GX_NORTH".into(),
            value: "1".into(),
            hidden: true,
        };
        let mut buf = Vec::new();
        c.write_to(&mut buf, false).unwrap();
        assert_eq!(Constant::parse(&mut Cursor::new(&buf)).unwrap(), c);
    }
}
