//! The in-memory settings store.
//!
//! [`SettingsStore`] is the single source of truth for every persisted setting
//! while the application runs.  It answers the "resolved" questions the rest
//! of the application asks (what color, where, how large) by layering stored
//! values over the catalog's compiled-in defaults, and it converts itself to
//! and from a [`SettingsDocument`] for persistence.
//!
//! The store is not thread-safe.  It is meant to be owned by the UI thread
//! and mutated through `&mut self`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use hud_config_core::document::keys;
use hud_config_core::domain::scale::{default_normalized_scale, denormalize_scale};
use hud_config_core::{
    AnchorPoint, BackpackStyle, ChatColor, ChromaMode, Color, CoordsPair, DiscordStatus, Language,
    OrdinalEnum, PowerOrbStyle, SettingCatalog, SettingId, SettingsDocument, TextStyle, Viewport,
    CURRENT_SCHEMA_VERSION, FALLBACK_COLOR,
};
use tracing::debug;

use crate::infrastructure::host::{is_remote_disabled, ChromaSource, RemoteAdvisory};

/// Bar size used when neither the user nor the catalog specifies one.
pub const FALLBACK_BAR_SIZE: CoordsPair = CoordsPair::new(7, 1);

pub const DEFAULT_WARNING_SECONDS: i32 = 4;
/// Slider position for a chroma speed of 2.0.
pub const DEFAULT_CHROMA_SPEED: f32 = 0.193_548_38;
/// Slider position for a fade width of 10 degrees of hue.
pub const DEFAULT_CHROMA_FADE_WIDTH: f32 = 0.225_806_44;

/// What the last loaded document said about its own age.
///
/// Fields are `None` when the document did not carry them.  A store that was
/// freshly created, reset, or already migrated carries the current values, so
/// running the migration engine on it again is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationBaseline {
    pub schema_version: Option<u32>,
    pub last_known_max_setting_id: Option<SettingId>,
}

impl MigrationBaseline {
    /// The baseline of a store that is up to date with `catalog`.
    pub fn current(catalog: &dyn SettingCatalog) -> Self {
        Self {
            schema_version: Some(CURRENT_SCHEMA_VERSION),
            last_known_max_setting_id: Some(catalog.max_setting_id()),
        }
    }
}

/// All persisted settings, resolved against a [`SettingCatalog`].
pub struct SettingsStore {
    catalog: Arc<dyn SettingCatalog>,
    app_version: String,
    baseline: MigrationBaseline,

    disabled: BTreeSet<SettingId>,
    /// Packed `0xRRGGBB`.
    colors: BTreeMap<SettingId, u32>,
    coordinates: BTreeMap<SettingId, CoordsPair>,
    bar_sizes: BTreeMap<SettingId, CoordsPair>,
    anchors: BTreeMap<SettingId, AnchorPoint>,
    /// Normalized to `[0, 1]`.
    gui_scales: BTreeMap<SettingId, f32>,
    profile_locked_slots: BTreeMap<String, BTreeSet<i32>>,
    chroma_enabled: BTreeSet<SettingId>,

    warning_seconds: i32,
    chroma_speed: f32,
    chroma_fade_width: f32,
    language: Language,
    text_style: TextStyle,
    backpack_style: BackpackStyle,
    power_orb_style: PowerOrbStyle,
    chroma_mode: ChromaMode,
    discord_status: DiscordStatus,
    discord_details: DiscordStatus,
    discord_auto_default: DiscordStatus,
    discord_custom_statuses: Vec<String>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("app_version", &self.app_version)
            .field("baseline", &self.baseline)
            .field("disabled", &self.disabled)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Creates a store holding compiled-in defaults only.
    ///
    /// `app_version` is the running build's version string; it selects the
    /// remote advisory entry (see [`SettingsStore::is_remote_disabled`]).
    pub fn new(catalog: Arc<dyn SettingCatalog>, app_version: impl Into<String>) -> Self {
        let baseline = MigrationBaseline::current(catalog.as_ref());
        Self {
            catalog,
            app_version: app_version.into(),
            baseline,
            disabled: BTreeSet::new(),
            colors: BTreeMap::new(),
            coordinates: BTreeMap::new(),
            bar_sizes: BTreeMap::new(),
            anchors: BTreeMap::new(),
            gui_scales: BTreeMap::new(),
            profile_locked_slots: BTreeMap::new(),
            chroma_enabled: BTreeSet::new(),
            warning_seconds: DEFAULT_WARNING_SECONDS,
            chroma_speed: DEFAULT_CHROMA_SPEED,
            chroma_fade_width: DEFAULT_CHROMA_FADE_WIDTH,
            language: Language::default(),
            text_style: TextStyle::default(),
            backpack_style: BackpackStyle::default(),
            power_orb_style: PowerOrbStyle::default(),
            chroma_mode: ChromaMode::default(),
            discord_status: DiscordStatus::DEFAULT_STATUS,
            discord_details: DiscordStatus::DEFAULT_DETAILS,
            discord_auto_default: DiscordStatus::DEFAULT_AUTO,
            discord_custom_statuses: Vec::new(),
        }
    }

    /// Discards every stored value, returning to compiled-in defaults.
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.catalog), std::mem::take(&mut self.app_version));
    }

    pub fn catalog(&self) -> &Arc<dyn SettingCatalog> {
        &self.catalog
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn baseline(&self) -> MigrationBaseline {
        self.baseline
    }

    /// Marks the store as up to date with the current schema and catalog.
    pub(crate) fn mark_migrated(&mut self) {
        self.baseline = MigrationBaseline::current(self.catalog.as_ref());
    }

    /// Setters ignore ids the catalog does not know; such values could not be
    /// reloaded.
    fn accepts(&self, id: SettingId, what: &str) -> bool {
        let known = self.catalog.contains(id);
        if !known {
            debug!("ignoring {what} for unknown setting id {id}");
        }
        known
    }

    // ── Enablement ────────────────────────────────────────────────────────────

    /// Whether `id` is off, either by the user or by the remote advisory.
    pub fn is_disabled(&self, id: SettingId, advisory: &dyn RemoteAdvisory) -> bool {
        self.disabled.contains(&id) || self.is_remote_disabled(id, advisory)
    }

    pub fn is_enabled(&self, id: SettingId, advisory: &dyn RemoteAdvisory) -> bool {
        !self.is_disabled(id, advisory)
    }

    /// Whether the remote advisory disables `id` for this build's version.
    pub fn is_remote_disabled(&self, id: SettingId, advisory: &dyn RemoteAdvisory) -> bool {
        is_remote_disabled(advisory, &self.app_version, id)
    }

    /// Records the user's choice.  Never touches the remote advisory.
    pub fn set_disabled(&mut self, id: SettingId, disabled: bool) {
        if !self.accepts(id, "enablement") {
            return;
        }
        if disabled {
            self.disabled.insert(id);
        } else {
            self.disabled.remove(&id);
        }
    }

    /// Ids the user has turned off.
    pub fn disabled_settings(&self) -> &BTreeSet<SettingId> {
        &self.disabled
    }

    /// Adds `id` to the disabled set, returning whether it was newly added.
    pub(crate) fn force_disable(&mut self, id: SettingId) -> bool {
        self.catalog.contains(id) && self.disabled.insert(id)
    }

    // ── Colors ────────────────────────────────────────────────────────────────

    /// Resolved color of `id` with the given alpha.
    ///
    /// Chroma-enabled settings follow `chroma`; otherwise the stored color is
    /// used, then the catalog default, then [`FALLBACK_COLOR`].
    pub fn color_of(&self, id: SettingId, alpha: u8, chroma: &dyn ChromaSource) -> Color {
        if self.chroma_enabled.contains(&id) {
            return chroma.current_color().with_alpha(alpha);
        }
        let rgb = self
            .colors
            .get(&id)
            .copied()
            .or_else(|| self.default_color(id).map(Color::rgb))
            .unwrap_or_else(|| FALLBACK_COLOR.rgb());
        Color::from_rgb(rgb).with_alpha(alpha)
    }

    /// Stores a `0xRRGGBB` color.  Higher bits are ignored.
    pub fn set_color(&mut self, id: SettingId, rgb: u32) {
        if self.accepts(id, "color") {
            self.colors.insert(id, rgb & 0x00FF_FFFF);
        }
    }

    /// The palette entry for `id`, for settings limited to the chat palette.
    ///
    /// A stored color counts only if it is exactly a palette color; otherwise
    /// the catalog default is used.
    pub fn restricted_color_of(&self, id: SettingId) -> Option<ChatColor> {
        self.colors
            .get(&id)
            .and_then(|&rgb| ChatColor::from_rgb(rgb))
            .or_else(|| {
                self.default_color(id)
                    .and_then(|color| ChatColor::from_rgb(color.rgb()))
            })
    }

    fn default_color(&self, id: SettingId) -> Option<Color> {
        self.catalog.setting(id).and_then(|s| s.default_color)
    }

    pub fn is_chroma_enabled(&self, id: SettingId) -> bool {
        self.chroma_enabled.contains(&id)
    }

    pub fn set_chroma_enabled(&mut self, id: SettingId, enabled: bool) {
        if !self.accepts(id, "chroma flag") {
            return;
        }
        if enabled {
            self.chroma_enabled.insert(id);
        } else {
            self.chroma_enabled.remove(&id);
        }
    }

    pub fn chroma_enabled_settings(&self) -> &BTreeSet<SettingId> {
        &self.chroma_enabled
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    /// Position of `id` relative to its anchor.
    ///
    /// When nothing is stored the catalog default is written into the store
    /// and returned, so later saves keep it even if the default changes.
    pub fn coordinates_of(&mut self, id: SettingId) -> CoordsPair {
        if let Some(coordinates) = self.coordinates.get(&id) {
            return *coordinates;
        }
        let default = self
            .catalog
            .setting(id)
            .and_then(|s| s.default_coordinates)
            .unwrap_or(CoordsPair::ORIGIN);
        if self.catalog.contains(id) {
            self.coordinates.insert(id, default);
        }
        default
    }

    /// Stored position, without falling back to the catalog.
    pub fn stored_coordinates(&self, id: SettingId) -> Option<CoordsPair> {
        self.coordinates.get(&id).copied()
    }

    pub(crate) fn stored_coordinates_iter(
        &self,
    ) -> impl Iterator<Item = (SettingId, CoordsPair)> + '_ {
        self.coordinates.iter().map(|(&id, &c)| (id, c))
    }

    pub fn set_coordinates(&mut self, id: SettingId, x: i32, y: i32) {
        if self.accepts(id, "coordinates") {
            self.coordinates.insert(id, CoordsPair::new(x, y));
        }
    }

    /// Whether the user never moved `id` away from its default position.
    ///
    /// True when the catalog has no default, when nothing is stored, or when
    /// the stored position equals the default.
    pub fn coordinates_are_default(&self, id: SettingId) -> bool {
        let default = self.catalog.setting(id).and_then(|s| s.default_coordinates);
        match (default, self.coordinates.get(&id)) {
            (Some(default), Some(stored)) => *stored == default,
            _ => true,
        }
    }

    /// Bar dimensions of `id`: stored, then catalog default, then
    /// [`FALLBACK_BAR_SIZE`].
    pub fn bar_size_of(&self, id: SettingId) -> CoordsPair {
        self.bar_sizes
            .get(&id)
            .copied()
            .or_else(|| self.catalog.setting(id).and_then(|s| s.default_bar_size))
            .unwrap_or(FALLBACK_BAR_SIZE)
    }

    pub fn set_bar_size(&mut self, id: SettingId, size: CoordsPair) {
        if self.accepts(id, "bar size") {
            self.bar_sizes.insert(id, size);
        }
    }

    /// Changes the width, keeping the resolved height.
    pub fn set_bar_size_x(&mut self, id: SettingId, x: i32) {
        let current = self.bar_size_of(id);
        self.set_bar_size(id, CoordsPair::new(x, current.y));
    }

    /// Changes the height, keeping the resolved width.
    pub fn set_bar_size_y(&mut self, id: SettingId, y: i32) {
        let current = self.bar_size_of(id);
        self.set_bar_size(id, CoordsPair::new(current.x, y));
    }

    /// Stores the catalog's default bar size for every layout-capable setting
    /// that has none stored.  Returns how many were filled.
    pub(crate) fn fill_missing_bar_sizes(&mut self) -> usize {
        let catalog = Arc::clone(&self.catalog);
        let mut filled = 0;
        for setting in catalog.layout_capable_settings() {
            if let Some(size) = setting.default_bar_size {
                if !self.bar_sizes.contains_key(&setting.id) {
                    self.bar_sizes.insert(setting.id, size);
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Anchor of `id`: stored, then catalog default, then
    /// [`AnchorPoint::FALLBACK`].
    pub fn anchor_of(&self, id: SettingId) -> AnchorPoint {
        self.anchors
            .get(&id)
            .copied()
            .or_else(|| self.catalog.setting(id).and_then(|s| s.default_anchor))
            .unwrap_or(AnchorPoint::FALLBACK)
    }

    pub fn set_anchor(&mut self, id: SettingId, anchor: AnchorPoint) {
        if self.accepts(id, "anchor") {
            self.anchors.insert(id, anchor);
        }
    }

    /// Absolute screen position of `id`: its anchor resolved on `viewport`
    /// plus its relative coordinates.
    pub fn actual_position(&mut self, id: SettingId, viewport: Viewport) -> CoordsPair {
        let relative = self.coordinates_of(id);
        let origin = self.anchor_of(id).resolve(viewport);
        origin.offset(relative.x, relative.y)
    }

    /// Re-anchors `id` to the anchor nearest the absolute point and stores
    /// coordinates relative to it, so the element does not move on screen.
    pub fn set_closest_anchor(
        &mut self,
        id: SettingId,
        absolute_x: i32,
        absolute_y: i32,
        viewport: Viewport,
    ) {
        if !self.accepts(id, "anchor") {
            return;
        }
        let anchor = AnchorPoint::closest_to(absolute_x, absolute_y, viewport);
        let origin = anchor.resolve(viewport);
        self.anchors.insert(id, anchor);
        self.coordinates.insert(
            id,
            CoordsPair::new(
                absolute_x.saturating_sub(origin.x),
                absolute_y.saturating_sub(origin.y),
            ),
        );
    }

    /// Restores the catalog's layout: anchors, bar sizes and coordinates for
    /// every layout-capable setting that has a default, and no custom scales.
    pub fn reset_layout_to_defaults(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        for setting in catalog.layout_capable_settings() {
            if let Some(anchor) = setting.default_anchor {
                self.anchors.insert(setting.id, anchor);
            }
            if let Some(size) = setting.default_bar_size {
                self.bar_sizes.insert(setting.id, size);
            }
            if let Some(coordinates) = setting.default_coordinates {
                self.coordinates.insert(setting.id, coordinates);
            }
        }
        self.gui_scales.clear();
    }

    /// Real GUI scale of `id` when `denormalize`, else the stored slider
    /// position.
    pub fn gui_scale_of(&self, id: SettingId, denormalize: bool) -> f32 {
        let normalized = self
            .gui_scales
            .get(&id)
            .copied()
            .unwrap_or_else(default_normalized_scale);
        if denormalize {
            denormalize_scale(normalized)
        } else {
            normalized
        }
    }

    /// Stores a normalized scale, clamped to `[0, 1]`.
    pub fn set_gui_scale(&mut self, id: SettingId, normalized: f32) {
        if self.accepts(id, "scale") && !normalized.is_nan() {
            self.gui_scales.insert(id, normalized.clamp(0.0, 1.0));
        }
    }

    /// The locked inventory slots of `profile`, created empty on first use.
    pub fn locked_slots_for(&mut self, profile: &str) -> &mut BTreeSet<i32> {
        self.profile_locked_slots
            .entry(profile.to_string())
            .or_default()
    }

    pub fn profiles_with_locked_slots(&self) -> impl Iterator<Item = &str> + '_ {
        self.profile_locked_slots.keys().map(String::as_str)
    }

    // ── First run ─────────────────────────────────────────────────────────────

    /// Seeds a store that has no document: catalog default colors and
    /// default-disabled settings, plus the default layout.
    pub fn apply_first_run_defaults(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        for setting in catalog.all_settings() {
            if let Some(color) = setting.default_color {
                self.colors.insert(setting.id, color.rgb());
            }
            if setting.default_disabled {
                self.disabled.insert(setting.id);
            }
        }
        self.reset_layout_to_defaults();
    }

    // ── Global scalars and choices ────────────────────────────────────────────

    pub fn warning_seconds(&self) -> i32 {
        self.warning_seconds
    }

    pub fn set_warning_seconds(&mut self, seconds: i32) {
        self.warning_seconds = seconds;
    }

    pub fn chroma_speed(&self) -> f32 {
        self.chroma_speed
    }

    /// Non-finite values are ignored.
    pub fn set_chroma_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.chroma_speed = speed;
        }
    }

    pub fn chroma_fade_width(&self) -> f32 {
        self.chroma_fade_width
    }

    /// Non-finite values are ignored.
    pub fn set_chroma_fade_width(&mut self, width: f32) {
        if width.is_finite() {
            self.chroma_fade_width = width;
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    pub fn backpack_style(&self) -> BackpackStyle {
        self.backpack_style
    }

    pub fn set_backpack_style(&mut self, style: BackpackStyle) {
        self.backpack_style = style;
    }

    pub fn power_orb_style(&self) -> PowerOrbStyle {
        self.power_orb_style
    }

    pub fn set_power_orb_style(&mut self, style: PowerOrbStyle) {
        self.power_orb_style = style;
    }

    pub fn chroma_mode(&self) -> ChromaMode {
        self.chroma_mode
    }

    pub fn set_chroma_mode(&mut self, mode: ChromaMode) {
        self.chroma_mode = mode;
    }

    pub fn discord_status(&self) -> DiscordStatus {
        self.discord_status
    }

    pub fn set_discord_status(&mut self, status: DiscordStatus) {
        self.discord_status = status;
    }

    pub fn discord_details(&self) -> DiscordStatus {
        self.discord_details
    }

    pub fn set_discord_details(&mut self, status: DiscordStatus) {
        self.discord_details = status;
    }

    pub fn discord_auto_default(&self) -> DiscordStatus {
        self.discord_auto_default
    }

    pub fn set_discord_auto_default(&mut self, status: DiscordStatus) {
        self.discord_auto_default = status;
    }

    pub fn discord_custom_statuses(&self) -> &[String] {
        &self.discord_custom_statuses
    }

    pub fn discord_custom_statuses_mut(&mut self) -> &mut Vec<String> {
        &mut self.discord_custom_statuses
    }

    // ── Document conversion ───────────────────────────────────────────────────

    /// Replaces the store's contents with a decoded document.
    ///
    /// The store is reset first, so fields absent from the document (or
    /// dropped by the decoder) end up at their compiled-in default.  Entries for
    /// ids the catalog does not know are dropped, as are out-of-range anchor
    /// ordinals; out-of-range choice ordinals and unknown languages fall back
    /// to the compiled-in default.
    pub fn apply_document(&mut self, document: SettingsDocument) {
        self.reset();
        let catalog = Arc::clone(&self.catalog);
        let catalog = catalog.as_ref();

        self.baseline = MigrationBaseline {
            schema_version: document.schema_version,
            last_known_max_setting_id: document.last_known_max_setting_id,
        };

        if let Some(ids) = document.disabled_setting_ids {
            self.disabled = known_set(catalog, keys::DISABLED_SETTING_IDS, ids);
        }
        if let Some(ids) = document.chroma_enabled_setting_ids {
            self.chroma_enabled = known_set(catalog, keys::CHROMA_ENABLED_SETTING_IDS, ids);
        }
        if let Some(colors) = document.per_setting_color {
            self.colors = known_map(catalog, keys::PER_SETTING_COLOR, colors)
                .into_iter()
                .map(|(id, rgb)| (id, rgb & 0x00FF_FFFF))
                .collect();
        }
        if let Some(coordinates) = document.per_setting_coordinates {
            self.coordinates = known_map(catalog, keys::PER_SETTING_COORDINATES, coordinates);
        }
        if let Some(sizes) = document.per_setting_bar_size {
            self.bar_sizes = known_map(catalog, keys::PER_SETTING_BAR_SIZE, sizes);
        }
        if let Some(anchors) = document.per_setting_anchor {
            self.anchors = known_map(catalog, keys::PER_SETTING_ANCHOR, anchors)
                .into_iter()
                .filter_map(|(id, ordinal)| {
                    let anchor = AnchorPoint::from_ordinal(ordinal);
                    if anchor.is_none() {
                        debug!(
                            "{}: dropping anchor ordinal {ordinal} for {id}",
                            keys::PER_SETTING_ANCHOR
                        );
                    }
                    anchor.map(|a| (id, a))
                })
                .collect();
        }
        if let Some(scales) = document.per_setting_scale {
            self.gui_scales = known_map(catalog, keys::PER_SETTING_SCALE, scales)
                .into_iter()
                .map(|(id, scale)| (id, scale.clamp(0.0, 1.0)))
                .collect();
        }
        if let Some(slots) = document.per_profile_locked_slots {
            self.profile_locked_slots = slots;
        }

        if let Some(seconds) = document.warning_seconds {
            self.warning_seconds = seconds;
        }
        if let Some(speed) = document.chroma_speed {
            self.chroma_speed = speed;
        }
        if let Some(width) = document.chroma_fade_width {
            self.chroma_fade_width = width;
        }
        if let Some(code) = document.language {
            self.language = Language::from_path(&code).unwrap_or_else(|| {
                debug!("{}: unknown language `{code}`", keys::LANGUAGE);
                Language::default()
            });
        }
        if let Some(ordinal) = document.text_style {
            self.text_style = choice_or(keys::TEXT_STYLE, ordinal, TextStyle::default());
        }
        if let Some(ordinal) = document.backpack_style {
            self.backpack_style =
                choice_or(keys::BACKPACK_STYLE, ordinal, BackpackStyle::default());
        }
        if let Some(ordinal) = document.power_orb_style {
            self.power_orb_style =
                choice_or(keys::POWER_ORB_STYLE, ordinal, PowerOrbStyle::default());
        }
        if let Some(ordinal) = document.chroma_mode {
            self.chroma_mode = choice_or(keys::CHROMA_MODE, ordinal, ChromaMode::default());
        }
        if let Some(ordinal) = document.discord_status {
            self.discord_status =
                choice_or(keys::DISCORD_STATUS, ordinal, DiscordStatus::DEFAULT_STATUS);
        }
        if let Some(ordinal) = document.discord_details {
            self.discord_details =
                choice_or(keys::DISCORD_DETAILS, ordinal, DiscordStatus::DEFAULT_DETAILS);
        }
        if let Some(ordinal) = document.discord_auto_default {
            self.discord_auto_default =
                choice_or(keys::DISCORD_AUTO_DEFAULT, ordinal, DiscordStatus::DEFAULT_AUTO);
        }
        if let Some(statuses) = document.discord_custom_statuses {
            self.discord_custom_statuses = statuses;
        }
    }

    /// Snapshot of the store in its persisted form, stamped with the current
    /// schema version and the catalog's highest id.
    ///
    /// Colors equal to [`FALLBACK_COLOR`] are left out, and every
    /// layout-capable setting gets an explicit (resolved) anchor.
    pub fn to_document(&self) -> SettingsDocument {
        let fallback_rgb = FALLBACK_COLOR.rgb();
        let mut anchors: BTreeMap<SettingId, u32> = self
            .anchors
            .iter()
            .map(|(&id, anchor)| (id, anchor.ordinal()))
            .collect();
        for setting in self.catalog.layout_capable_settings() {
            anchors
                .entry(setting.id)
                .or_insert_with(|| self.anchor_of(setting.id).ordinal());
        }

        SettingsDocument {
            schema_version: Some(CURRENT_SCHEMA_VERSION),
            disabled_setting_ids: Some(self.disabled.clone()),
            per_setting_color: Some(
                self.colors
                    .iter()
                    .filter(|&(_, &rgb)| rgb != fallback_rgb)
                    .map(|(&id, &rgb)| (id, rgb))
                    .collect(),
            ),
            per_setting_coordinates: Some(self.coordinates.clone()),
            per_setting_bar_size: Some(self.bar_sizes.clone()),
            per_setting_anchor: Some(anchors),
            per_setting_scale: Some(self.gui_scales.clone()),
            per_profile_locked_slots: Some(self.profile_locked_slots.clone()),
            chroma_enabled_setting_ids: Some(self.chroma_enabled.clone()),
            warning_seconds: Some(self.warning_seconds),
            chroma_speed: Some(self.chroma_speed),
            chroma_fade_width: Some(self.chroma_fade_width),
            language: Some(self.language.path().to_string()),
            text_style: Some(self.text_style.ordinal()),
            backpack_style: Some(self.backpack_style.ordinal()),
            power_orb_style: Some(self.power_orb_style.ordinal()),
            chroma_mode: Some(self.chroma_mode.ordinal()),
            discord_status: Some(self.discord_status.ordinal()),
            discord_details: Some(self.discord_details.ordinal()),
            discord_auto_default: Some(self.discord_auto_default.ordinal()),
            discord_custom_statuses: Some(self.discord_custom_statuses.clone()),
            last_known_max_setting_id: Some(self.catalog.max_setting_id()),
        }
    }
}

fn known_set(
    catalog: &dyn SettingCatalog,
    field: &str,
    ids: BTreeSet<SettingId>,
) -> BTreeSet<SettingId> {
    ids.into_iter()
        .filter(|&id| {
            let known = catalog.contains(id);
            if !known {
                debug!("{field}: dropping unknown setting id {id}");
            }
            known
        })
        .collect()
}

fn known_map<T>(
    catalog: &dyn SettingCatalog,
    field: &str,
    entries: BTreeMap<SettingId, T>,
) -> BTreeMap<SettingId, T> {
    entries
        .into_iter()
        .filter(|&(id, _)| {
            let known = catalog.contains(id);
            if !known {
                debug!("{field}: dropping unknown setting id {id}");
            }
            known
        })
        .collect()
}

fn choice_or<E: OrdinalEnum + fmt::Debug>(field: &str, ordinal: u32, default: E) -> E {
    E::from_ordinal(ordinal).unwrap_or_else(|| {
        debug!("{field}: ordinal {ordinal} out of range, using {default:?}");
        default
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
