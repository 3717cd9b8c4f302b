//! Canvas geometry, palette and typography shared by every layout.
//!
//! Lengths are EMU (English Metric Units), the native OOXML unit.
//! Positions are built additively from the constants here; layouts never
//! carry their own absolute coordinates.

use serde::{Deserialize, Serialize};

/// Length in English Metric Units.
pub type Emu = i64;

/// EMU per inch.
pub const EMU_PER_INCH: Emu = 914_400;

/// EMU per typographic point.
pub const EMU_PER_POINT: Emu = 12_700;

/// Convert inches to EMU, rounded to the nearest unit.
pub fn inches(value: f64) -> Emu {
    (value * EMU_PER_INCH as f64).round() as Emu
}

/// Convert points to EMU, rounded to the nearest unit.
pub fn points(value: f64) -> Emu {
    (value * EMU_PER_POINT as f64).round() as Emu
}

pub const SLIDE_WIDTH: Emu = 16 * EMU_PER_INCH;
pub const SLIDE_HEIGHT: Emu = 9 * EMU_PER_INCH;

pub const MARGIN_LEFT: Emu = EMU_PER_INCH;
pub const MARGIN_RIGHT: Emu = EMU_PER_INCH;
pub const MARGIN_TOP: Emu = EMU_PER_INCH * 8 / 10;
pub const MARGIN_BOTTOM: Emu = EMU_PER_INCH * 8 / 10;

/// Width between the left and right margins.
pub const CONTENT_WIDTH: Emu = SLIDE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// Top of the body region under a standard slide title.
pub const BODY_TOP: Emu = MARGIN_TOP + EMU_PER_INCH * 12 / 10;

/// Font sizes in whole points.
pub mod font {
    pub const TITLE: u32 = 60;
    pub const SLIDE_TITLE: u32 = 36;
    pub const SUBHEAD: u32 = 30;
    pub const BODY: u32 = 20;
    pub const CAPTION: u32 = 24;
    pub const SECTION_NUMBER: u32 = 150;

    /// Typeface for headlines.
    pub const HEADLINE_FACE: &str = "Meiryo UI";
    /// Typeface for body text.
    pub const BODY_FACE: &str = "Meiryo UI";
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case hex without a leading `#`, as OOXML `srgbClr` expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Named colors of the deck theme.
pub mod palette {
    use super::Color;

    pub const ACCENT: Color = Color::rgb(66, 133, 244);
    pub const TEXT: Color = Color::rgb(32, 33, 36);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Color = Color::rgb(220, 220, 220);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    /// Fill colors cycled across cards by index.
    pub const CARD_ROTATION: [Color; 6] = [ACCENT, RED, ORANGE, ACCENT, GREEN, RED];

    /// Card fill for the card at `index`.
    pub fn card(index: usize) -> Color {
        CARD_ROTATION[index % CARD_ROTATION.len()]
    }
}

/// An axis-aligned rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Rect {
    pub const fn new(x: Emu, y: Emu, cx: Emu, cy: Emu) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn right(&self) -> Emu {
        self.x + self.cx
    }

    pub fn bottom(&self) -> Emu {
        self.y + self.cy
    }

    pub fn center_x(&self) -> Emu {
        self.x + self.cx / 2
    }

    pub fn center_y(&self) -> Emu {
        self.y + self.cy / 2
    }
}

/// Space between the body top and the bottom margin.
pub fn remaining_height(body_top: Emu) -> Emu {
    SLIDE_HEIGHT - body_top - MARGIN_BOTTOM
}

/// Width of each of `count` equal columns separated by `gap`.
pub fn column_width(total: Emu, count: i64, gap: Emu) -> Emu {
    if count <= 0 {
        return 0;
    }
    (total - (count - 1) * gap) / count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(1.5), 1_371_600);
        assert_eq!(inches(0.8), 731_520);
        assert_eq!(points(12.0), 152_400);
    }

    #[test]
    fn test_canvas_is_sixteen_by_nine() {
        assert_eq!(SLIDE_WIDTH, 14_630_400);
        assert_eq!(SLIDE_HEIGHT, 8_229_600);
        assert_eq!(SLIDE_WIDTH * 9, SLIDE_HEIGHT * 16);
        assert_eq!(MARGIN_TOP, inches(0.8));
        assert_eq!(CONTENT_WIDTH, inches(14.0));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(palette::ACCENT.hex(), "4285F4");
        assert_eq!(palette::TEXT.hex(), "202124");
    }

    #[test]
    fn test_card_rotation_wraps() {
        assert_eq!(palette::card(0), palette::ACCENT);
        assert_eq!(palette::card(1), palette::RED);
        assert_eq!(palette::card(6), palette::ACCENT);
        assert_eq!(palette::card(10), palette::GREEN);
    }

    #[test]
    fn test_column_width() {
        let two = column_width(CONTENT_WIDTH, 2, inches(0.5));
        assert_eq!(two * 2 + inches(0.5), CONTENT_WIDTH);
        assert_eq!(column_width(CONTENT_WIDTH, 0, 0), 0);
    }
}
