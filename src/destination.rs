//! Filesystem writes into the workspace: parent creation, change-aware writes
//! and verbatim copies.

use std::fs;
use std::io;
use std::path::Path;

/// Result of persisting a destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or its content replaced.
    Written,
    /// The file already held identical bytes and was left untouched.
    Unchanged,
}

/// Create the parent directory of `path` when it does not exist yet.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Write `contents` to `path` unless the file already holds exactly these bytes.
pub fn write_if_changed(path: &Path, contents: &[u8]) -> io::Result<WriteOutcome> {
    if path.is_file() {
        if let Ok(existing) = fs::read(path) {
            if existing == contents {
                return Ok(WriteOutcome::Unchanged);
            }
        }
    }
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(WriteOutcome::Written)
}

/// Copy `source` over `destination` byte for byte, creating parents on demand.
/// Overwrites the destination without further checks.
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<u64> {
    ensure_parent(destination)?;
    fs::copy(source, destination)
}
