//! Line buffer I/O with atomic, locked writes

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use prune_blocks::LineBuffer;
use tracing::debug;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a reader never sees a partial file.
/// The temp file is held under an exclusive advisory lock while written.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let finished = persist(&temp_file, &temp_path, path, content);
    if finished.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    finished?;
    debug!(path = %path.display(), bytes = content.len(), "file written");

    Ok(())
}

/// Lock, fill and sync the temp file, then move it over `path`.
fn persist(temp_file: &File, temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: path.to_path_buf(),
    };

    FileExt::lock_exclusive(temp_file).map_err(|_| lock_failed())?;
    let mut writer = temp_file;
    writer
        .write_all(content)
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| Error::io(temp_path, e))?;
    FileExt::unlock(temp_file).map_err(|_| lock_failed())?;

    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Load a file as a line buffer, keeping every line terminator.
pub fn read_lines(path: &Path) -> Result<LineBuffer> {
    let buffer = LineBuffer::from_text(&read_text(path)?);
    debug!(path = %path.display(), lines = buffer.len(), "file loaded");
    Ok(buffer)
}

/// Write lines back out atomically, exactly as given.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len()).sum());
    for line in lines {
        content.push_str(line.as_ref());
    }
    write_atomic(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.ts");

        write_atomic(&path, b"content").unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.ts")]);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/out.ts");

        write_atomic(&path, b"x").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.ts");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.ts"), "x").unwrap();

        let result = write_atomic(&path, b"content");

        assert!(matches!(result, Err(Error::Io { .. })));
        let entries: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.ts")]);
    }
}
