use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("export directory missing or not writable: {0}")]
    ExportDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates the export directory if needed and checks that it accepts files.
pub fn ensure_export_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::ExportDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::ExportDir(e.to_string()))?;
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::ExportDir(e.to_string()))?;
    Ok(())
}

/// Writes whole files into one directory via temp file + rename, so readers
/// never observe a half-written export.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_export_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
