//! Ports to the host application.
//!
//! The settings engine needs a few read-only signals from its surroundings:
//! the remotely published "disabled features" list, the current chroma color,
//! and the host's locale.  Each is a small trait so the store and controller
//! can be tested with fixed values (see [`mock`]).

use std::collections::{HashMap, HashSet};

use hud_config_core::{Color, SettingId};
use serde::Deserialize;

pub mod mock;

/// Key of the advisory entry that applies to every version.
pub const ALL_VERSIONS_KEY: &str = "all";

/// Remotely published list of settings that must be treated as disabled.
pub trait RemoteAdvisory {
    /// Ids disabled for `version_or_all` (a version string such as `"1.5.2"`,
    /// or [`ALL_VERSIONS_KEY`]).  `None` when the list has no such entry.
    fn disabled_ids_for(&self, version_or_all: &str) -> Option<&HashSet<SettingId>>;
}

/// Returns whether `id` is remotely disabled for a build running `app_version`.
///
/// An `"all"` entry, when present, is authoritative.  Otherwise the entry for
/// the running version is consulted, with any pre-release suffix (everything
/// from the first `-`) stripped.
pub fn is_remote_disabled(
    advisory: &dyn RemoteAdvisory,
    app_version: &str,
    id: SettingId,
) -> bool {
    if let Some(ids) = advisory.disabled_ids_for(ALL_VERSIONS_KEY) {
        return ids.contains(&id);
    }
    let version = app_version.split('-').next().unwrap_or(app_version);
    advisory
        .disabled_ids_for(version)
        .is_some_and(|ids| ids.contains(&id))
}

/// In-memory advisory list, deserializable from the published JSON object
/// (`{ "all": [..], "1.5.2": [..] }`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryList {
    disabled: HashMap<String, HashSet<SettingId>>,
}

impl AdvisoryList {
    /// Parses the published JSON form.
    ///
    /// # Errors
    ///
    /// Returns the serde_json error if `bytes` is not an object of id arrays.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Adds (or replaces) the entry for `version_or_all`.
    pub fn insert(
        &mut self,
        version_or_all: impl Into<String>,
        ids: impl IntoIterator<Item = SettingId>,
    ) {
        self.disabled
            .insert(version_or_all.into(), ids.into_iter().collect());
    }
}

impl RemoteAdvisory for AdvisoryList {
    fn disabled_ids_for(&self, version_or_all: &str) -> Option<&HashSet<SettingId>> {
        self.disabled.get(version_or_all)
    }
}

/// Source of the time-varying chroma color.
pub trait ChromaSource {
    fn current_color(&self) -> Color;
}

/// The host's current locale, e.g. `"en_US"`.
pub trait HostLocale {
    fn current_language_code(&self) -> Option<String>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
