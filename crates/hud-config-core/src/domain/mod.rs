//! Domain types for overlay settings.
//!
//! Nothing in here touches the file system or the host application.  The
//! catalog of settings is an input ([`setting::SettingCatalog`]); everything
//! else is plain value types and the pure math that operates on them.

/// Enumerated global choices persisted by ordinal or path code.
pub mod choices;
/// RGB colors and the named chat-color palette.
pub mod color;
/// Anchors, relative coordinates, and viewport resolution.
pub mod geometry;
/// Normalized GUI scale math.
pub mod scale;
/// Setting identities and the catalog trait.
pub mod setting;
