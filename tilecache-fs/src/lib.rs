//! Filesystem access for the tile cache, built on `cap-std` and `camino`.
//!
//! Paths handed to these helpers come from the host application (a storage
//! root, an import directory, a tile image) and are resolved the way the
//! operating system resolves them: symbolic links and `..` components are
//! followed, so an app-private directory reached through a link works.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Create every missing directory above the cache database at `database`.
///
/// Existing directories are left alone; a path with no parent needs no work.
pub fn ensure_parent_dir(database: &Utf8Path) -> io::Result<()> {
    match database.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())
        }
        _ => Ok(()),
    }
}

/// Read a tile image into memory. The payload is opaque bytes.
pub fn read_file_bytes(tile: &Utf8Path) -> io::Result<Vec<u8>> {
    let mut file = fs_utf8::File::open_ambient(tile, ambient_authority())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Whether `path` names a regular file, following links.
///
/// A missing path is reported as `NotFound` so callers can tell it apart from
/// a directory.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    match fs_utf8::File::open_ambient(path, ambient_authority()) {
        Ok(file) => Ok(file.metadata()?.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(err),
        // Some platforms refuse to open directories as files.
        Err(err) => match fs_utf8::Dir::open_ambient_dir(path, ambient_authority()) {
            Ok(_) => Ok(false),
            Err(_) => Err(err),
        },
    }
}
