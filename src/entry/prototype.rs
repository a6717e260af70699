//! The prototype - an extension's manifest.
//!
//! The prototype names the extension, credits it, lists the packages it
//! depends on, and owns the ordered data entries whose payloads the GEX
//! container carries. A GED/GMP project file is nothing but a prototype.
//!
//! ## Layout (dialect 700)
//! ```text
//! revision:i32
//! editable:i32  name:str  tempFolder:str  version:str  author:str
//! date:str  license:str  description:str  helpFile:str  hidden:i32
//! depCount:i32   dep[depCount]:str
//! fileCount:i32  dataEntry[fileCount]
//! ```

use std::io::{Read, Write};

use crate::Result;
use crate::entry::data::DataEntry;
use crate::entry::{REVISION_DEFAULT, expect_revision, list_len, write_revision};
use crate::utils::{
    AnsiString, ansi_str, le_bool, write_ansi_str, write_ansi_str_or, write_le_bool,
    write_le_i32, write_le_i32_or,
};

/// An extension manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    /// Whether the IDE lets the user open and edit the installed
    /// extension. Defaults to true; stripped by optimize mode.
    pub editable: bool,
    pub name: AnsiString,
    /// Folder name the runner extracts payloads into.
    pub temp_folder: AnsiString,
    pub version: AnsiString,
    pub author: AnsiString,
    pub date: AnsiString,
    pub license: AnsiString,
    pub description: AnsiString,
    /// Path of the help file; empty when the extension ships none. When
    /// non-empty, the help file occupies the first payload slot of a GEX.
    pub help_file: AnsiString,
    pub hidden: bool,
    /// Names of extensions this one requires, in order.
    pub dependencies: Vec<AnsiString>,
    /// The embedded files, in payload-slot order.
    pub files: Vec<DataEntry>,
}

impl Default for Prototype {
    fn default() -> Self {
        Self {
            editable: true,
            name: AnsiString::new(),
            temp_folder: AnsiString::new(),
            version: AnsiString::new(),
            author: AnsiString::new(),
            date: AnsiString::new(),
            license: AnsiString::new(),
            description: AnsiString::new(),
            help_file: AnsiString::new(),
            hidden: false,
            dependencies: Vec::new(),
            files: Vec::new(),
        }
    }
}

impl Prototype {
    /// Parse a full prototype entry (revision prefix included) from `r`.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_revision(r, REVISION_DEFAULT)?;
        let editable = le_bool(r)?;
        let name = ansi_str(r)?;
        let temp_folder = ansi_str(r)?;
        let version = ansi_str(r)?;
        let author = ansi_str(r)?;
        let date = ansi_str(r)?;
        let license = ansi_str(r)?;
        let description = ansi_str(r)?;
        let help_file = ansi_str(r)?;
        let hidden = le_bool(r)?;

        let mut dependencies = Vec::new();
        for _ in 0..list_len(r)? {
            dependencies.push(ansi_str(r)?);
        }
        let mut files = Vec::new();
        for _ in 0..list_len(r)? {
            files.push(DataEntry::parse(r)?);
        }

        Ok(Self {
            editable,
            name,
            temp_folder,
            version,
            author,
            date,
            license,
            description,
            help_file,
            hidden,
            dependencies,
            files,
        })
    }

    /// Write a full prototype entry to `w`.
    ///
    /// Optimize mode clears the editable flag, and shrinks the help-file
    /// path to its bare extension - the IDE only shells out on the
    /// extension, so the rest of the path is dead weight in a package.
    pub fn write_to<W: Write>(&self, w: &mut W, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_DEFAULT, optimize)?;
        write_le_i32_or(w, optimize, 0, self.editable as i32)?;
        write_ansi_str(w, &self.name)?;
        write_ansi_str(w, &self.temp_folder)?;
        write_ansi_str(w, &self.version)?;
        write_ansi_str(w, &self.author)?;
        write_ansi_str(w, &self.date)?;
        write_ansi_str(w, &self.license)?;
        write_ansi_str(w, &self.description)?;
        write_ansi_str_or(w, optimize, &self.help_file.extension(), &self.help_file)?;
        write_le_bool(w, self.hidden)?;

        write_le_i32(w, self.dependencies.len() as i32)?;
        for dep in &self.dependencies {
            write_ansi_str(w, dep)?;
        }
        write_le_i32(w, self.files.len() as i32)?;
        for file in &self.files {
            file.write_to(w, optimize)?;
        }
        Ok(())
    }
}
