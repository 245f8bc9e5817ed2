//! Fixed-value host ports for tests and headless hosts.

use hud_config_core::Color;

use super::{ChromaSource, HostLocale};

/// A chroma source that never changes color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChroma(pub Color);

impl ChromaSource for FixedChroma {
    fn current_color(&self) -> Color {
        self.0
    }
}

/// A host locale that always reports the same code (or none).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocale(pub Option<String>);

impl FixedLocale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(Some(code.into()))
    }

    /// A host that cannot report its locale.
    pub fn unknown() -> Self {
        Self(None)
    }
}

impl HostLocale for FixedLocale {
    fn current_language_code(&self) -> Option<String> {
        self.0.clone()
    }
}
