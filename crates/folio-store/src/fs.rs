//! Filesystem helpers for replacing the catalog file in one step.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while a save is in progress: `catalog.txt` → `catalog.txt.tmp`.
pub fn temp_path_for(destination: &Path) -> PathBuf {
    let mut name: OsString = destination.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Renames `temp_path` over `destination`.
///
/// Some platforms refuse to rename onto an existing file; in that case the
/// destination is removed and the rename retried. The temp file is removed
/// if the retry fails too.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "replacing {} failed (initial: {}, retry: {})",
                    destination.display(),
                    initial_err,
                    retry_err
                ),
            )
        })?;
    }
    Ok(())
}
