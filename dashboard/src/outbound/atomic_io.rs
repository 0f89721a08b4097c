//! Crash-safe file replacement inside a capability directory.
//!
//! Contents go to a hidden sibling file first, which is synced and then
//! renamed over the target. Readers see either the old file or the new one.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::fs::{Dir, OpenOptions};
use thiserror::Error;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Failure while replacing a file.
#[derive(Debug, Error)]
#[error("failed to write '{path}': {source}")]
pub(crate) struct AtomicWriteError {
    path: Utf8PathBuf,
    #[source]
    source: io::Error,
}

impl AtomicWriteError {
    fn new(path: &Utf8Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Replace `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a single normal path component.
pub(crate) fn replace_file(
    dir: &Dir,
    file_name: &Utf8Path,
    contents: &[u8],
) -> Result<(), AtomicWriteError> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(AtomicWriteError::new(
            file_name,
            io::Error::new(io::ErrorKind::InvalidInput, "target must be a bare file name"),
        ));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_name = format!(".{name}.{}.{counter}.tmp", std::process::id());

    if let Err(err) = write_synced(dir, &temp_name, contents) {
        discard(dir, &temp_name);
        return Err(AtomicWriteError::new(Utf8Path::new(&temp_name), err));
    }
    if let Err(err) = swap_into_place(dir, &temp_name, name) {
        discard(dir, &temp_name);
        return Err(AtomicWriteError::new(file_name, err));
    }
    // Directory sync is best effort; the rename has already happened.
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        drop(err);
    }
    Ok(())
}

fn write_synced(dir: &Dir, temp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(temp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn swap_into_place(dir: &Dir, temp_name: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
        _ => {}
    }
    dir.rename(temp_name, dir, target)
}

#[cfg(not(windows))]
fn swap_into_place(dir: &Dir, temp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(temp_name, dir, target)
}

fn discard(dir: &Dir, temp_name: &str) {
    if let Err(err) = dir.remove_file(temp_name) {
        drop(err);
    }
}
