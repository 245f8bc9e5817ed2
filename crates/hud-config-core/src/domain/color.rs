//! Colors and the fixed chat-color palette.

/// An RGBA color.  Stored settings only keep the 24-bit RGB part; the alpha
/// channel is supplied by the caller at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Builds an opaque color from a packed `0xRRGGBB` value.  Bits above the
    /// low 24 are ignored.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xFF) as u8,
            green: ((rgb >> 8) & 0xFF) as u8,
            blue: (rgb & 0xFF) as u8,
            alpha: 0xFF,
        }
    }

    /// Packed `0xRRGGBB` value without alpha.
    pub const fn rgb(self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Same color with the alpha channel replaced.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }
}

/// The sixteen named chat colors a setting may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    pub const ALL: &'static [ChatColor] = &[
        ChatColor::Black,
        ChatColor::DarkBlue,
        ChatColor::DarkGreen,
        ChatColor::DarkAqua,
        ChatColor::DarkRed,
        ChatColor::DarkPurple,
        ChatColor::Gold,
        ChatColor::Gray,
        ChatColor::DarkGray,
        ChatColor::Blue,
        ChatColor::Green,
        ChatColor::Aqua,
        ChatColor::Red,
        ChatColor::LightPurple,
        ChatColor::Yellow,
        ChatColor::White,
    ];

    pub const fn rgb(self) -> u32 {
        match self {
            ChatColor::Black => 0x000000,
            ChatColor::DarkBlue => 0x0000AA,
            ChatColor::DarkGreen => 0x00AA00,
            ChatColor::DarkAqua => 0x00AAAA,
            ChatColor::DarkRed => 0xAA0000,
            ChatColor::DarkPurple => 0xAA00AA,
            ChatColor::Gold => 0xFFAA00,
            ChatColor::Gray => 0xAAAAAA,
            ChatColor::DarkGray => 0x555555,
            ChatColor::Blue => 0x5555FF,
            ChatColor::Green => 0x55FF55,
            ChatColor::Aqua => 0x55FFFF,
            ChatColor::Red => 0xFF5555,
            ChatColor::LightPurple => 0xFF55FF,
            ChatColor::Yellow => 0xFFFF55,
            ChatColor::White => 0xFFFFFF,
        }
    }

    pub const fn color(self) -> Color {
        Color::from_rgb(self.rgb())
    }

    /// Palette entry with exactly this RGB value, if any.
    pub fn from_rgb(rgb: u32) -> Option<ChatColor> {
        Self::ALL.iter().copied().find(|c| c.rgb() == rgb & 0x00FF_FFFF)
    }
}

/// Color used when neither the store nor the catalog define one.  Entries equal
/// to it are not written to disk.
pub const FALLBACK_COLOR: Color = ChatColor::Red.color();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_unpacks_channels() {
        let color = Color::from_rgb(0x12_34_56);
        assert_eq!((color.red, color.green, color.blue, color.alpha), (0x12, 0x34, 0x56, 0xFF));
        assert_eq!(color.rgb(), 0x123456);
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let color = Color::from_rgb(0xABCDEF).with_alpha(40);
        assert_eq!(color.alpha, 40);
        assert_eq!(color.rgb(), 0xABCDEF);
    }

    #[test]
    fn test_palette_lookup_by_rgb() {
        assert_eq!(ChatColor::from_rgb(0xFFAA00), Some(ChatColor::Gold));
        assert_eq!(ChatColor::from_rgb(0x123456), None);
        assert_eq!(FALLBACK_COLOR.rgb(), 0xFF5555);
    }
}
