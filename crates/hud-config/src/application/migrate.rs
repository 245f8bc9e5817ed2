//! Schema migration of freshly loaded settings.
//!
//! Documents carry the schema version and the highest setting id of the build
//! that wrote them.  After a document has been applied to the store, the
//! [`MigrationEngine`] brings the store up to date:
//!
//! | Document version | Rule                                                        |
//! |------------------|-------------------------------------------------------------|
//! | `<= 5`           | force the roman-numerals setting off                        |
//! | `<= 6`           | fill missing bar sizes; shift bottom-middle elements        |
//! | any              | disable default-off settings added since the document      |
//!
//! Rules are cumulative: a version 4 document gets every rule.  Once applied,
//! the store's [`MigrationBaseline`](super::store::MigrationBaseline) is
//! stamped current, so running the engine twice changes nothing.

use std::sync::Arc;

use hud_config_core::{AnchorPoint, SettingId, CURRENT_SCHEMA_VERSION};
use tracing::{debug, info};

use super::store::SettingsStore;

/// Offset applied to bottom-middle elements written before version 7, when
/// the bottom-middle anchor moved to the exact bottom center of the screen.
const BOTTOM_MIDDLE_SHIFT: (i32, i32) = (-91, -39);

/// Last schema version that lacked the roman-numerals rule.
const ROMAN_NUMERALS_RULE_VERSION: u32 = 5;
/// Last schema version with the old bottom-middle origin and no bar sizes.
const LAYOUT_RULE_VERSION: u32 = 6;

/// Historical setting id used as the new-setting baseline when a document
/// predates `lastKnownMaxSettingId`.
pub const DEFAULT_LEGACY_LAST_KNOWN_SETTING_ID: SettingId = 45;
/// Id of the "hide roman numerals" setting in the historical catalog.
pub const DEFAULT_ROMAN_NUMERALS_SETTING_ID: SettingId = 66;

/// Historical constants the migration rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Version assumed for documents without `schemaVersion`.
    ///
    /// Defaults to [`CURRENT_SCHEMA_VERSION`], not to the newest version
    /// before the field existed: the shipped loader has always treated an
    /// unversioned document as current, so no layout rules run on it.  Hosts
    /// that need the older reading can lower this.
    pub unversioned_schema_version: u32,
    /// New-setting baseline for documents without `lastKnownMaxSettingId`.
    pub legacy_last_known_setting_id: SettingId,
    /// Setting forced off for documents at version 5 or older.
    pub roman_numerals_setting_id: SettingId,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            unversioned_schema_version: CURRENT_SCHEMA_VERSION,
            legacy_last_known_setting_id: DEFAULT_LEGACY_LAST_KNOWN_SETTING_ID,
            roman_numerals_setting_id: DEFAULT_ROMAN_NUMERALS_SETTING_ID,
        }
    }
}

/// One rule that changed the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    /// A setting was forced off.
    ForcedDisabled(SettingId),
    /// Default bar sizes were stored for this many settings.
    FilledBarSizes(usize),
    /// This many bottom-middle positions were shifted to the new origin.
    ShiftedBottomMiddle(usize),
}

/// What [`MigrationEngine::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Schema version the store was migrated from.
    pub from_version: u32,
    pub steps: Vec<MigrationStep>,
    /// Default-off settings added since the document was written, newly
    /// added to the disabled set.
    pub newly_disabled: Vec<SettingId>,
}

impl MigrationReport {
    /// Whether the store was left untouched.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.newly_disabled.is_empty()
    }
}

/// Applies the version-gated migration rules.
#[derive(Debug, Clone, Default)]
pub struct MigrationEngine {
    config: MigrationConfig,
}

impl MigrationEngine {
    pub fn new(config: MigrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Migrates `store` from the version recorded in its baseline to the
    /// current schema, then stamps the baseline current.
    pub fn apply(&self, store: &mut SettingsStore) -> MigrationReport {
        let baseline = store.baseline();
        let from_version = baseline
            .schema_version
            .unwrap_or(self.config.unversioned_schema_version);
        let mut report = MigrationReport {
            from_version,
            steps: Vec::new(),
            newly_disabled: Vec::new(),
        };

        if from_version <= ROMAN_NUMERALS_RULE_VERSION {
            let id = self.config.roman_numerals_setting_id;
            if store.force_disable(id) {
                report.steps.push(MigrationStep::ForcedDisabled(id));
            }
        }

        if from_version <= LAYOUT_RULE_VERSION {
            let filled = store.fill_missing_bar_sizes();
            if filled > 0 {
                report.steps.push(MigrationStep::FilledBarSizes(filled));
            }
            let shifted = shift_bottom_middle(store);
            if shifted > 0 {
                report.steps.push(MigrationStep::ShiftedBottomMiddle(shifted));
            }
        }

        let last_known = baseline
            .last_known_max_setting_id
            .unwrap_or(self.config.legacy_last_known_setting_id);
        let catalog = Arc::clone(store.catalog());
        for setting in catalog.all_settings() {
            if setting.id > last_known
                && setting.default_disabled
                && store.coordinates_are_default(setting.id)
                && store.force_disable(setting.id)
            {
                debug!("disabling new setting {} ({})", setting.id, setting.name);
                report.newly_disabled.push(setting.id);
            }
        }

        store.mark_migrated();
        if !report.is_empty() {
            info!(
                "migrated settings from schema version {from_version} to {CURRENT_SCHEMA_VERSION}: \
                 {:?}, newly disabled {:?}",
                report.steps, report.newly_disabled
            );
        }
        report
    }
}

fn shift_bottom_middle(store: &mut SettingsStore) -> usize {
    let (dx, dy) = BOTTOM_MIDDLE_SHIFT;
    let targets: Vec<_> = store
        .stored_coordinates_iter()
        .filter(|&(id, _)| store.anchor_of(id) == AnchorPoint::BottomMiddle)
        .collect();
    for &(id, coordinates) in &targets {
        let shifted = coordinates.offset(dx, dy);
        store.set_coordinates(id, shifted.x, shifted.y);
    }
    targets.len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
