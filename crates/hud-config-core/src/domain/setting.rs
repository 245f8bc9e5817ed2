//! Setting identities and the catalog that defines them.
//!
//! The catalog is owned by the host application: it lists every setting the
//! running build knows about together with its compiled-in defaults.  This
//! crate only consumes it through the [`SettingCatalog`] trait.
//!
//! Ids are append-only.  A document written by a newer build may reference ids
//! this build has never heard of; those are ignored on load.

use std::collections::HashMap;

use crate::domain::color::Color;
use crate::domain::geometry::{AnchorPoint, CoordsPair};

/// Stable numeric identifier of a setting.
pub type SettingId = u32;

/// Static attributes of one setting.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDescriptor {
    pub id: SettingId,
    /// Human-readable name, used in log messages only.
    pub name: String,
    /// Whether a fresh install starts with this setting turned off.
    pub default_disabled: bool,
    pub default_color: Option<Color>,
    pub default_coordinates: Option<CoordsPair>,
    pub default_bar_size: Option<CoordsPair>,
    pub default_anchor: Option<AnchorPoint>,
    /// Whether the setting is a draggable overlay element with a position,
    /// anchor and bar size.
    pub layout_capable: bool,
}

impl SettingDescriptor {
    /// A plain toggle with no defaults.
    pub fn new(id: SettingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_disabled: false,
            default_color: None,
            default_coordinates: None,
            default_bar_size: None,
            default_anchor: None,
            layout_capable: false,
        }
    }

    pub fn default_disabled(mut self) -> Self {
        self.default_disabled = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.default_color = Some(color);
        self
    }

    /// Marks the setting layout-capable and sets its default position.
    pub fn with_layout(mut self, anchor: AnchorPoint, coordinates: CoordsPair) -> Self {
        self.layout_capable = true;
        self.default_anchor = Some(anchor);
        self.default_coordinates = Some(coordinates);
        self
    }

    pub fn with_bar_size(mut self, size: CoordsPair) -> Self {
        self.layout_capable = true;
        self.default_bar_size = Some(size);
        self
    }
}

/// Read-only registry of every setting known to the running build.
pub trait SettingCatalog: Send + Sync {
    /// All settings, in ascending id order.
    fn all_settings(&self) -> &[SettingDescriptor];

    /// Looks up a setting by id.
    fn setting(&self, id: SettingId) -> Option<&SettingDescriptor> {
        self.all_settings().iter().find(|s| s.id == id)
    }

    /// Whether `id` belongs to a known setting.
    fn contains(&self, id: SettingId) -> bool {
        self.setting(id).is_some()
    }

    /// Settings that are positioned overlay elements.
    fn layout_capable_settings(&self) -> Vec<&SettingDescriptor> {
        self.all_settings()
            .iter()
            .filter(|s| s.layout_capable)
            .collect()
    }

    /// Highest id in the catalog, or `0` when empty.
    fn max_setting_id(&self) -> SettingId {
        self.all_settings().iter().map(|s| s.id).max().unwrap_or(0)
    }
}

/// A [`SettingCatalog`] backed by a vector, with an id index.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    settings: Vec<SettingDescriptor>,
    index: HashMap<SettingId, usize>,
}

impl StaticCatalog {
    /// Builds a catalog.  Settings are sorted by id; when an id appears more
    /// than once the last descriptor wins.
    pub fn new(settings: impl IntoIterator<Item = SettingDescriptor>) -> Self {
        let mut by_id: HashMap<SettingId, SettingDescriptor> = HashMap::new();
        for descriptor in settings {
            by_id.insert(descriptor.id, descriptor);
        }
        let mut settings: Vec<SettingDescriptor> = by_id.into_values().collect();
        settings.sort_by_key(|s| s.id);
        let index = settings
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        Self { settings, index }
    }
}

impl SettingCatalog for StaticCatalog {
    fn all_settings(&self) -> &[SettingDescriptor] {
        &self.settings
    }

    fn setting(&self, id: SettingId) -> Option<&SettingDescriptor> {
        self.index.get(&id).map(|&i| &self.settings[i])
    }

    fn max_setting_id(&self) -> SettingId {
        self.settings.last().map_or(0, |s| s.id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> StaticCatalog {
        StaticCatalog::new([
            SettingDescriptor::new(7, "health_bar")
                .with_layout(AnchorPoint::BottomMiddle, CoordsPair::new(-71, -45))
                .with_bar_size(CoordsPair::new(7, 1)),
            SettingDescriptor::new(2, "hide_bones"),
            SettingDescriptor::new(11, "fishing_timer").default_disabled(),
        ])
    }

    #[test]
    fn test_static_catalog_sorts_by_id() {
        let catalog = sample_catalog();
        let ids: Vec<SettingId> = catalog.all_settings().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 7, 11]);
    }

    #[test]
    fn test_static_catalog_lookup_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.setting(7).map(|s| s.name.as_str()), Some("health_bar"));
        assert!(catalog.setting(3).is_none());
        assert!(catalog.contains(11));
    }

    #[test]
    fn test_max_setting_id() {
        assert_eq!(sample_catalog().max_setting_id(), 11);
        assert_eq!(StaticCatalog::default().max_setting_id(), 0);
    }

    #[test]
    fn test_layout_capable_settings_only_lists_positioned_elements() {
        let catalog = sample_catalog();
        let ids: Vec<SettingId> = catalog
            .layout_capable_settings()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![7]);
    }

    #[test]
    fn test_duplicate_ids_keep_last_descriptor() {
        let catalog = StaticCatalog::new([
            SettingDescriptor::new(1, "old"),
            SettingDescriptor::new(1, "new"),
        ]);
        assert_eq!(catalog.all_settings().len(), 1);
        assert_eq!(catalog.setting(1).map(|s| s.name.as_str()), Some("new"));
    }
}
