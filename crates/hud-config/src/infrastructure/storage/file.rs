//! On-disk settings document.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DocumentStorage, StorageError, DOCUMENT_FILE_NAME};

/// A settings document stored in a single file.
///
/// Writes go to a sibling `<name>.tmp` file which is then renamed over the
/// target, so readers only ever see a complete document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DOCUMENT_FILE_NAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentStorage for FileStorage {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> Result<Vec<u8>, StorageError> {
        fs::read(&self.path).map_err(io_error(&self.path))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_error(dir))?;
        }

        let temp = self.temp_path();
        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(source) = written {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Io { path: temp, source });
        }

        if let Err(source) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Io {
                path: self.path.clone(),
                source,
            });
        }
        debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("hud-config-file-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_does_not_exist_and_fails_to_read() {
        // Arrange
        let storage = FileStorage::new(scratch_dir().join("settings.json"));

        // Assert
        assert!(!storage.exists());
        assert!(matches!(storage.read(), Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_write_creates_directories_and_replaces_content() {
        // Arrange
        let dir = scratch_dir();
        let mut storage = FileStorage::new(dir.join("nested").join("settings.json"));

        // Act
        storage.write(b"{\"a\":1}").expect("first write");
        storage.write(b"{\"a\":2}").expect("second write");

        // Assert
        assert!(storage.exists());
        assert_eq!(storage.read().expect("read"), b"{\"a\":2}");
        assert!(!storage.temp_path().exists(), "temp file must not linger");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_failed_write_leaves_previous_document() {
        // Arrange: the temp file path is occupied by a directory, so creating
        // it fails before the target is touched
        let dir = scratch_dir();
        let mut storage = FileStorage::new(dir.join("settings.json"));
        storage.write(b"old").expect("seed");
        fs::create_dir_all(storage.temp_path()).expect("block temp path");

        // Act
        let result = storage.write(b"new");

        // Assert
        assert!(result.is_err());
        assert_eq!(storage.read().expect("read"), b"old");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_temp_path_is_sibling_of_target() {
        let storage = FileStorage::new("/config/hud/settings.json");
        assert_eq!(
            storage.temp_path(),
            PathBuf::from("/config/hud/settings.json.tmp")
        );
    }
}
