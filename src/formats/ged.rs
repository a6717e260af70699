//! GED / GMP - the editable extension project file.
//!
//! A project file is the prototype entry written bare: no signature, no
//! cipher, no payload region. The embedded files it references live next
//! to it on disk until the project is compiled into a GEX.
//!
//! ## Layout
//! ```text
//! prototype        -- full entry, revision 700
//! ```

use std::io::{Read, Write};

use log::debug;

use crate::Result;
use crate::entry::prototype::Prototype;

/// Read a project file from `r`.
pub fn read<R: Read>(r: &mut R) -> Result<Prototype> {
    let prototype = Prototype::parse(r)?;
    debug!(
        "read project \"{}\" ({} files, {} dependencies)",
        prototype.name,
        prototype.files.len(),
        prototype.dependencies.len()
    );
    Ok(prototype)
}

/// Write a project file to `w`.
pub fn write<W: Write>(w: &mut W, prototype: &Prototype, optimize: bool) -> Result<()> {
    debug!("writing project \"{}\"", prototype.name);
    prototype.write_to(w, optimize)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn project_file_starts_with_the_revision() {
        let proto = Prototype {
            name: "Example".into(),
            ..Prototype::default()
        };
        let mut buf = Vec::new();
        write(&mut buf, &proto, false).unwrap();
        assert_eq!(&buf[..4], &700i32.to_le_bytes());
        assert_eq!(read(&mut Cursor::new(&buf)).unwrap(), proto);
    }
}
