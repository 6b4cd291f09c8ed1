use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Tile fill when no picture piece is available
    pub tile_bg: Color,
    /// Cursor frame color
    pub cursor: Color,
    /// Frame color of the tile picked for a swap
    pub picked: Color,
    /// Lock marker color
    pub locked: Color,
    /// Error color
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            tile_bg: Color::Rgb { r: 45, g: 50, b: 65 },
            cursor: Color::Rgb { r: 255, g: 210, b: 100 },
            picked: Color::Rgb { r: 80, g: 180, b: 255 },
            locked: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Text color readable on top of a tile's average color
    pub fn label_on(&self, [r, g, b]: [u8; 3]) -> Color {
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if luma > 140 {
            Color::Black
        } else {
            Color::White
        }
    }
}
