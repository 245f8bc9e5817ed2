//! # hud-config
//!
//! Persistent settings for an always-on HUD overlay.
//!
//! The crate keeps every user setting in a [`SettingsStore`], loads it from a
//! versioned JSON document at startup, migrates documents written by older
//! builds, and writes the store back when the user changes something.
//!
//! # Crate layout
//!
//! - **`application`** – the store, the migration engine, and the
//!   [`PersistenceController`] that drives load and save.
//! - **`infrastructure`** – document storage (file or memory) and the host
//!   ports (remote advisory, chroma color, locale).
//!
//! Value types, the setting catalog, and the document codec come from
//! `hud-config-core`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hud_config::infrastructure::host::mock::FixedLocale;
//! use hud_config::infrastructure::storage::{default_document_path, file::FileStorage};
//! use hud_config::{PersistenceController, SettingsStore};
//! use hud_config_core::{SettingDescriptor, StaticCatalog};
//!
//! let catalog = Arc::new(StaticCatalog::new([SettingDescriptor::new(1, "health_bar")]));
//! let mut store = SettingsStore::new(catalog, "1.0.0");
//! let path = default_document_path("HudOverlay").expect("config dir");
//! let mut persistence =
//!     PersistenceController::new(FileStorage::new(path), FixedLocale::unknown(), || {});
//! persistence.load(&mut store);
//! store.set_warning_seconds(6);
//! persistence.save(&store).expect("save");
//! ```

pub mod application;
pub mod infrastructure;

pub use application::migrate::{MigrationConfig, MigrationEngine, MigrationReport, MigrationStep};
pub use application::persistence::{
    LoadOutcome, PersistError, PersistenceController, SynthesisReason,
};
pub use application::store::{MigrationBaseline, SettingsStore};
pub use infrastructure::host::{AdvisoryList, ChromaSource, HostLocale, RemoteAdvisory};
pub use infrastructure::storage::{DocumentStorage, StorageError};
