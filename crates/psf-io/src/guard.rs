//! Cleanup guard for partially written output files.
//!
//! The driver creates its output file before the input is parsed, so an
//! input failure would otherwise leave an empty or truncated file on
//! disk. [`OutputGuard`] removes the file on drop unless the caller marks
//! the write complete with [`OutputGuard::keep`].

use crate::IoResult;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deletes the guarded file on drop unless [`keep`](OutputGuard::keep)
/// was called.
#[derive(Debug)]
pub struct OutputGuard {
    path: PathBuf,
    armed: bool,
}

impl OutputGuard {
    /// Creates the output file and an armed guard for it.
    pub fn create<P: AsRef<Path>>(path: P) -> IoResult<(File, OutputGuard)> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok((file, OutputGuard { path, armed: true }))
    }

    /// Marks the write complete; the file survives the guard.
    pub fn keep(mut self) {
        self.armed = false;
    }

    /// Path of the guarded file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.armed {
            debug!(path = %self.path.display(), "removing incomplete output");
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn drop_removes_incomplete_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ppm");

        let (mut file, guard) = OutputGuard::create(&path).unwrap();
        file.write_all(b"partial").unwrap();
        drop(file);
        assert!(path.exists());

        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn keep_preserves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ppm");

        let (mut file, guard) = OutputGuard::create(&path).unwrap();
        file.write_all(b"complete").unwrap();
        drop(file);
        guard.keep();

        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"complete");
    }

    #[test]
    fn guard_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ppm");
        let (_file, guard) = OutputGuard::create(&path).unwrap();
        assert_eq!(guard.path(), path);
        guard.keep();
    }
}
