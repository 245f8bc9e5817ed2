//! # hud-config-core
//!
//! Shared foundation for persisting HUD overlay settings: the setting catalog
//! abstraction, the value types settings are made of, and the JSON document
//! codec.
//!
//! This crate has no file-system access and no knowledge of the host
//! application.  The stateful parts (the settings store, schema migration, and
//! load/save orchestration) live in the `hud-config` crate.
//!
//! - **`domain`** – setting ids and the [`SettingCatalog`] trait, colors,
//!   anchors and coordinates, enumerated choices, and GUI scale math.
//! - **`document`** – the versioned [`SettingsDocument`] and a codec that
//!   decodes each field in isolation so one bad value never costs the user
//!   the rest of their settings.

pub mod document;
pub mod domain;

pub use document::{
    decode_document, encode_document, DecodedDocument, DocumentError, FieldError, FieldErrorKind,
    SettingsDocument, CURRENT_SCHEMA_VERSION,
};
pub use domain::choices::{
    BackpackStyle, ChromaMode, DiscordStatus, Language, OrdinalEnum, PowerOrbStyle, TextStyle,
};
pub use domain::color::{ChatColor, Color, FALLBACK_COLOR};
pub use domain::geometry::{AnchorPoint, CoordsPair, Viewport};
pub use domain::setting::{SettingCatalog, SettingDescriptor, SettingId, StaticCatalog};
