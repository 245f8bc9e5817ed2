//! Enumerated global choices and their persisted representation.
//!
//! Most choices are persisted by ordinal (position in the declaration), so
//! variants may only ever be appended.  [`OrdinalEnum`] maps ordinals to
//! values through a static table; an out-of-range ordinal yields `None` and
//! the caller keeps its compiled-in default.
//!
//! [`Language`] is the exception: it is persisted by its path code
//! (e.g. `"en_us"`).

/// A fieldless enum whose persisted form is its declaration index.
pub trait OrdinalEnum: Copy + PartialEq + Sized + 'static {
    /// All variants in declaration order.
    const VARIANTS: &'static [Self];

    /// Declaration index of `self`.
    fn ordinal(self) -> u32 {
        Self::VARIANTS
            .iter()
            .position(|v| *v == self)
            .map_or(0, |i| i as u32)
    }

    /// Returns the variant at `ordinal`, or `None` when out of range.
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::VARIANTS.get(ordinal as usize).copied()
    }
}

/// How text-based overlay elements are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    StyleOne,
    StyleTwo,
}

impl OrdinalEnum for TextStyle {
    const VARIANTS: &'static [Self] = &[TextStyle::StyleOne, TextStyle::StyleTwo];
}

/// How backpack previews are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackpackStyle {
    #[default]
    Gui,
    Box,
}

impl OrdinalEnum for BackpackStyle {
    const VARIANTS: &'static [Self] = &[BackpackStyle::Gui, BackpackStyle::Box];
}

/// Layout of the power-orb display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerOrbStyle {
    Detailed,
    #[default]
    Compact,
}

impl OrdinalEnum for PowerOrbStyle {
    const VARIANTS: &'static [Self] = &[PowerOrbStyle::Detailed, PowerOrbStyle::Compact];
}

/// Chroma animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaMode {
    AllSameColor,
    #[default]
    Fade,
}

impl OrdinalEnum for ChromaMode {
    const VARIANTS: &'static [Self] = &[ChromaMode::AllSameColor, ChromaMode::Fade];
}

/// What the rich-presence integration shows in a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscordStatus {
    None,
    Location,
    Purse,
    Bits,
    Stats,
    Zealots,
    Item,
    Time,
    Profile,
    Custom,
    AutoStatus,
}

impl OrdinalEnum for DiscordStatus {
    const VARIANTS: &'static [Self] = &[
        DiscordStatus::None,
        DiscordStatus::Location,
        DiscordStatus::Purse,
        DiscordStatus::Bits,
        DiscordStatus::Stats,
        DiscordStatus::Zealots,
        DiscordStatus::Item,
        DiscordStatus::Time,
        DiscordStatus::Profile,
        DiscordStatus::Custom,
        DiscordStatus::AutoStatus,
    ];
}

impl DiscordStatus {
    pub const DEFAULT_STATUS: DiscordStatus = DiscordStatus::AutoStatus;
    pub const DEFAULT_DETAILS: DiscordStatus = DiscordStatus::Location;
    pub const DEFAULT_AUTO: DiscordStatus = DiscordStatus::None;
}

/// Display language, persisted by its lowercase path code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    ChineseTraditional,
    ChineseSimplified,
    Czech,
    Dutch,
    French,
    German,
    Hebrew,
    Italian,
    Japanese,
    Korean,
    Polish,
    PortugueseBrazil,
    PortuguesePortugal,
    Russian,
    Spanish,
    Swedish,
    Turkish,
    Ukrainian,
    Vietnamese,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::English,
        Language::ChineseTraditional,
        Language::ChineseSimplified,
        Language::Czech,
        Language::Dutch,
        Language::French,
        Language::German,
        Language::Hebrew,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Polish,
        Language::PortugueseBrazil,
        Language::PortuguesePortugal,
        Language::Russian,
        Language::Spanish,
        Language::Swedish,
        Language::Turkish,
        Language::Ukrainian,
        Language::Vietnamese,
    ];

    /// Path code of the language resource file, e.g. `"en_us"`.
    pub fn path(self) -> &'static str {
        match self {
            Language::English => "en_us",
            Language::ChineseTraditional => "zh_tw",
            Language::ChineseSimplified => "zh_cn",
            Language::Czech => "cs_cz",
            Language::Dutch => "nl_nl",
            Language::French => "fr_fr",
            Language::German => "de_de",
            Language::Hebrew => "he_il",
            Language::Italian => "it_it",
            Language::Japanese => "ja_jp",
            Language::Korean => "ko_kr",
            Language::Polish => "pl_pl",
            Language::PortugueseBrazil => "pt_br",
            Language::PortuguesePortugal => "pt_pt",
            Language::Russian => "ru_ru",
            Language::Spanish => "es_es",
            Language::Swedish => "sv_se",
            Language::Turkish => "tr_tr",
            Language::Ukrainian => "uk_ua",
            Language::Vietnamese => "vi_vn",
        }
    }

    /// Exact path-code lookup (case-sensitive, codes are lowercase).
    pub fn from_path(path: &str) -> Option<Language> {
        Self::ALL.iter().copied().find(|l| l.path() == path)
    }

    /// Best match for a host locale code such as `"de_AT"`.
    ///
    /// Tries the exact locale first, then the first language sharing the
    /// part before `_`.
    pub fn from_host_code(code: &str) -> Option<Language> {
        let code = code.to_lowercase();
        if let Some(exact) = Self::from_path(&code) {
            return Some(exact);
        }
        let prefix = code.split('_').next().unwrap_or_default();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.path().split('_').next() == Some(prefix))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
