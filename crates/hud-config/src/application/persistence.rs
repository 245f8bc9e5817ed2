//! Load and save orchestration.
//!
//! [`PersistenceController`] ties the store to its [`DocumentStorage`]:
//!
//! - **load**: a missing document triggers first-run synthesis; an unreadable
//!   or corrupt one resets the store and synthesizes defaults; a readable one
//!   is decoded field by field, applied, and migrated.  The reload hook runs
//!   on every path.
//! - **save**: the store's snapshot is encoded and written in one step.  A
//!   failed save is logged and returned; the in-memory store is untouched.

use hud_config_core::{decode_document, encode_document, Language};
use thiserror::Error;
use tracing::{error, info, warn};

use super::migrate::{MigrationEngine, MigrationReport};
use super::store::SettingsStore;
use crate::infrastructure::host::HostLocale;
use crate::infrastructure::storage::{DocumentStorage, StorageError};

/// Error type for saving settings.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The snapshot could not be serialized.
    #[error("failed to encode settings document: {0}")]
    Encode(#[from] serde_json::Error),
    /// The storage rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why defaults were synthesized instead of loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisReason {
    /// No document exists yet (first run).
    Missing,
    /// A document exists but could not be read.
    Unreadable,
    /// The document is empty or not a JSON object.
    Corrupt,
}

/// Result of [`PersistenceController::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A document was applied.  `field_failures` counts fields (or entries)
    /// that fell back to defaults.
    Loaded {
        field_failures: usize,
        migration: MigrationReport,
    },
    /// The store holds freshly synthesized defaults.
    Synthesized(SynthesisReason),
}

/// Loads the store from storage and saves it back.
pub struct PersistenceController {
    storage: Box<dyn DocumentStorage>,
    locale: Box<dyn HostLocale>,
    on_loaded: Box<dyn FnMut()>,
    migration: MigrationEngine,
}

impl PersistenceController {
    /// `on_loaded` runs at the end of every [`load`](Self::load), whichever
    /// path it took; the host uses it to reload language resources.
    pub fn new(
        storage: impl DocumentStorage + 'static,
        locale: impl HostLocale + 'static,
        on_loaded: impl FnMut() + 'static,
    ) -> Self {
        Self {
            storage: Box::new(storage),
            locale: Box::new(locale),
            on_loaded: Box::new(on_loaded),
            migration: MigrationEngine::default(),
        }
    }

    /// Replaces the default migration engine.
    pub fn with_migration(mut self, migration: MigrationEngine) -> Self {
        self.migration = migration;
        self
    }

    pub fn storage(&self) -> &dyn DocumentStorage {
        self.storage.as_ref()
    }

    /// Populates `store` from storage.  Never fails: every problem degrades
    /// to defaults and is logged.
    pub fn load(&mut self, store: &mut SettingsStore) -> LoadOutcome {
        let outcome = self.load_document(store);
        (self.on_loaded)();
        outcome
    }

    fn load_document(&mut self, store: &mut SettingsStore) -> LoadOutcome {
        let location = self.storage.location();
        if !self.storage.exists() {
            info!("no settings found at {location}, writing defaults");
            return self.synthesize(store, SynthesisReason::Missing);
        }

        let bytes = match self.storage.read() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not read settings: {e}; resetting all settings to default");
                return self.synthesize(store, SynthesisReason::Unreadable);
            }
        };

        let decoded = match decode_document(&bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(
                    "settings at {location} are corrupt ({e}); resetting all settings to default"
                );
                return self.synthesize(store, SynthesisReason::Corrupt);
            }
        };

        let field_failures = decoded.field_errors.len();
        store.apply_document(decoded.document);
        let migration = self.migration.apply(store);
        if field_failures > 0 {
            warn!("loaded settings from {location}; {field_failures} value(s) reverted to default");
        } else {
            info!("loaded settings from {location}");
        }
        LoadOutcome::Loaded {
            field_failures,
            migration,
        }
    }

    /// Resets `store` to first-run defaults and tries to persist them.
    fn synthesize(&mut self, store: &mut SettingsStore, reason: SynthesisReason) -> LoadOutcome {
        store.reset();
        let language = self
            .locale
            .current_language_code()
            .as_deref()
            .and_then(Language::from_host_code);
        if let Some(language) = language {
            store.set_language(language);
        }
        store.apply_first_run_defaults();
        // Failure is already logged; the defaults stay in memory.
        let _ = self.save(store);
        LoadOutcome::Synthesized(reason)
    }

    /// Writes the store's snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] if serialization fails or
    /// [`PersistError::Storage`] if the write fails.  In both cases the
    /// previously stored document is left as it was.
    pub fn save(&mut self, store: &SettingsStore) -> Result<(), PersistError> {
        let result = encode_document(&store.to_document())
            .map_err(PersistError::from)
            .and_then(|bytes| self.storage.write(&bytes).map_err(PersistError::from));
        if let Err(e) = &result {
            error!("failed to save settings: {e}");
        }
        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
