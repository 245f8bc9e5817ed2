//! The persisted settings document.
//!
//! [`SettingsDocument`] is a pure transfer format: it is built fresh on every
//! load (by the codec) and on every save (from the store), and never kept
//! around in between.  Ids and ordinals are kept raw here; validating them
//! against the catalog and the enum tables is the store's job.
//!
//! Every field is optional because any of them may be missing or unreadable in
//! a document on disk.  Documents produced for saving have all fields set.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::geometry::CoordsPair;
use crate::domain::setting::SettingId;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 7;

/// Top-level keys of the JSON document.
pub mod keys {
    pub const SCHEMA_VERSION: &str = "schemaVersion";
    pub const DISABLED_SETTING_IDS: &str = "disabledSettingIds";
    pub const PER_SETTING_COLOR: &str = "perSettingColor";
    pub const PER_SETTING_COORDINATES: &str = "perSettingCoordinates";
    pub const PER_SETTING_BAR_SIZE: &str = "perSettingBarSize";
    pub const PER_SETTING_ANCHOR: &str = "perSettingAnchor";
    pub const PER_SETTING_SCALE: &str = "perSettingScale";
    pub const PER_PROFILE_LOCKED_SLOTS: &str = "perProfileLockedSlots";
    pub const CHROMA_ENABLED_SETTING_IDS: &str = "chromaEnabledSettingIds";
    pub const WARNING_SECONDS: &str = "warningSeconds";
    pub const CHROMA_SPEED: &str = "chromaSpeed";
    pub const CHROMA_FADE_WIDTH: &str = "chromaFadeWidth";
    pub const LANGUAGE: &str = "language";
    pub const TEXT_STYLE: &str = "textStyle";
    pub const BACKPACK_STYLE: &str = "backpackStyle";
    pub const POWER_ORB_STYLE: &str = "powerOrbStyle";
    pub const CHROMA_MODE: &str = "chromaMode";
    pub const DISCORD_STATUS: &str = "discordStatus";
    pub const DISCORD_DETAILS: &str = "discordDetails";
    pub const DISCORD_AUTO_DEFAULT: &str = "discordAutoDefault";
    pub const DISCORD_CUSTOM_STATUSES: &str = "discordCustomStatuses";
    pub const LAST_KNOWN_MAX_SETTING_ID: &str = "lastKnownMaxSettingId";
}

/// Versioned snapshot of all persisted settings.
///
/// Serializes to the on-disk JSON shape: camelCase keys, integer map keys as
/// decimal strings (serde_json does this for integer keys), coordinate pairs
/// as `[x, y]`, and `None` fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_setting_ids: Option<BTreeSet<SettingId>>,
    /// Packed `0xRRGGBB` colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_setting_color: Option<BTreeMap<SettingId, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_setting_coordinates: Option<BTreeMap<SettingId, CoordsPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_setting_bar_size: Option<BTreeMap<SettingId, CoordsPair>>,
    /// Anchor ordinals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_setting_anchor: Option<BTreeMap<SettingId, u32>>,
    /// Normalized scales in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_setting_scale: Option<BTreeMap<SettingId, f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_profile_locked_slots: Option<BTreeMap<String, BTreeSet<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_enabled_setting_ids: Option<BTreeSet<SettingId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_fade_width: Option<f32>,
    /// Language path code, e.g. `"en_us"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backpack_style: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_orb_style: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_status: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_details: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_auto_default: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_custom_statuses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_max_setting_id: Option<SettingId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_match_key_constants() {
        // Arrange: a document with every field present
        let doc = SettingsDocument {
            schema_version: Some(CURRENT_SCHEMA_VERSION),
            disabled_setting_ids: Some(BTreeSet::new()),
            per_setting_color: Some(BTreeMap::new()),
            per_setting_coordinates: Some(BTreeMap::new()),
            per_setting_bar_size: Some(BTreeMap::new()),
            per_setting_anchor: Some(BTreeMap::new()),
            per_setting_scale: Some(BTreeMap::new()),
            per_profile_locked_slots: Some(BTreeMap::new()),
            chroma_enabled_setting_ids: Some(BTreeSet::new()),
            warning_seconds: Some(4),
            chroma_speed: Some(0.5),
            chroma_fade_width: Some(0.5),
            language: Some("en_us".to_string()),
            text_style: Some(0),
            backpack_style: Some(0),
            power_orb_style: Some(0),
            chroma_mode: Some(0),
            discord_status: Some(0),
            discord_details: Some(0),
            discord_auto_default: Some(0),
            discord_custom_statuses: Some(Vec::new()),
            last_known_max_setting_id: Some(1),
        };

        // Act
        let value = serde_json::to_value(&doc).expect("serialize");
        let object = value.as_object().expect("object");

        // Assert
        let expected = [
            keys::SCHEMA_VERSION,
            keys::DISABLED_SETTING_IDS,
            keys::PER_SETTING_COLOR,
            keys::PER_SETTING_COORDINATES,
            keys::PER_SETTING_BAR_SIZE,
            keys::PER_SETTING_ANCHOR,
            keys::PER_SETTING_SCALE,
            keys::PER_PROFILE_LOCKED_SLOTS,
            keys::CHROMA_ENABLED_SETTING_IDS,
            keys::WARNING_SECONDS,
            keys::CHROMA_SPEED,
            keys::CHROMA_FADE_WIDTH,
            keys::LANGUAGE,
            keys::TEXT_STYLE,
            keys::BACKPACK_STYLE,
            keys::POWER_ORB_STYLE,
            keys::CHROMA_MODE,
            keys::DISCORD_STATUS,
            keys::DISCORD_DETAILS,
            keys::DISCORD_AUTO_DEFAULT,
            keys::DISCORD_CUSTOM_STATUSES,
            keys::LAST_KNOWN_MAX_SETTING_ID,
        ];
        assert_eq!(object.len(), expected.len());
        for key in expected {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_integer_map_keys_serialize_as_strings() {
        let mut colors = BTreeMap::new();
        colors.insert(12, 0x00AA00);
        let doc = SettingsDocument {
            per_setting_color: Some(colors),
            ..SettingsDocument::default()
        };

        let json = serde_json::to_string(&doc).expect("serialize");

        assert_eq!(json, r#"{"perSettingColor":{"12":43520}}"#);
    }
}
