//! In-memory document storage for tests.
//!
//! Clones of a [`MockStorage`] share the same slot, so a test can hand one
//! clone to the persistence controller and keep another to inspect what was
//! written or to plant a document before loading.
//!
//! # Failure flags
//!
//! `set_fail_reads(true)` makes [`DocumentStorage::read`] fail while
//! [`DocumentStorage::exists`] still reports a document, which simulates an
//! unreadable file.  `set_fail_writes(true)` makes every write fail without
//! touching the stored bytes.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{DocumentStorage, StorageError};

#[derive(Debug, Default)]
struct Slot {
    contents: Option<Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// A shared in-memory document slot.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MockStorage {
    /// Creates an empty slot (no document yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already holding `bytes`.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage.lock().contents = Some(bytes.into());
        storage
    }

    /// Current document bytes, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock().contents.clone()
    }

    /// Current document as UTF-8 text, if any.
    pub fn contents_string(&self) -> Option<String> {
        self.contents()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn simulated(kind: std::io::ErrorKind) -> StorageError {
    StorageError::Io {
        path: "memory".into(),
        source: std::io::Error::new(kind, "simulated storage failure"),
    }
}

impl DocumentStorage for MockStorage {
    fn exists(&self) -> bool {
        self.lock().contents.is_some()
    }

    fn read(&self) -> Result<Vec<u8>, StorageError> {
        let slot = self.lock();
        if slot.fail_reads {
            return Err(simulated(std::io::ErrorKind::PermissionDenied));
        }
        slot.contents
            .clone()
            .ok_or_else(|| simulated(std::io::ErrorKind::NotFound))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        let mut slot = self.lock();
        if slot.fail_writes {
            return Err(simulated(std::io::ErrorKind::PermissionDenied));
        }
        slot.contents = Some(bytes.to_vec());
        slot.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
