//! Storage infrastructure: where the settings document lives.
//!
//! The application layer only sees [`DocumentStorage`], an opaque
//! "one document" slot.  Two adapters implement it:
//!
//! - [`file::FileStorage`] reads and writes a file on disk, replacing it
//!   atomically so a crash mid-save never leaves a truncated document.
//! - [`mock::MockStorage`] keeps the bytes in memory for tests.
//!
//! The default location is platform-specific:
//! - Windows:  `%APPDATA%\<app>\settings.json`
//! - Linux:    `$XDG_CONFIG_HOME/<app>/settings.json` (or `~/.config/<app>`)
//! - macOS:    `~/Library/Application Support/<app>/settings.json`

use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod mock;

/// File name of the settings document inside the application directory.
pub const DOCUMENT_FILE_NAME: &str = "settings.json";

/// Error type for document storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single persisted settings document.
pub trait DocumentStorage {
    /// Whether a document has been written before.
    fn exists(&self) -> bool;

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the document cannot be read.
    fn read(&self) -> Result<Vec<u8>, StorageError>;

    /// Replaces the document with `bytes`.  On failure the previous document
    /// must be left intact.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the document cannot be written.
    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError>;

    /// Human-readable location for log messages.
    fn location(&self) -> String;
}

// ── Default location ──────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for `app_dir_name`.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir(app_dir_name: &str) -> Result<PathBuf, StorageError> {
    platform_config_dir(app_dir_name).ok_or(StorageError::NoPlatformConfigDir)
}

/// Resolves the full path of the settings document for `app_dir_name`.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn default_document_path(app_dir_name: &str) -> Result<PathBuf, StorageError> {
    Ok(config_dir(app_dir_name)?.join(DOCUMENT_FILE_NAME))
}

fn platform_config_dir(app_dir_name: &str) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(app_dir_name))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(app_dir_name.to_lowercase()))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(app_dir_name)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        let _ = app_dir_name;
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_default_document_path_ends_with_app_dir_and_file_name() {
        // Arrange / Act
        let Ok(path) = default_document_path("HudOverlay") else {
            // No HOME / APPDATA in this environment; nothing to check.
            return;
        };

        // Assert
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DOCUMENT_FILE_NAME));
        let dir = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_lowercase);
        assert_eq!(dir.as_deref(), Some("hudoverlay"));
    }

    #[test]
    fn test_io_error_message_names_the_path() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/settings.json"));
    }
}
