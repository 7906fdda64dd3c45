//! Series colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color
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
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const DEFAULT_COLORS: [Color; 12] = [
    Color::rgb(0xFB, 0x15, 0x54),
    Color::rgb(0x74, 0xFF, 0x89),
    Color::rgb(0x8B, 0x1E, 0xFC),
    Color::rgb(0xFF, 0xC9, 0x2E),
    Color::rgb(0x00, 0xB3, 0xFF),
    Color::rgb(0xFF, 0x6E, 0x00),
    Color::rgb(0x3F, 0xD4, 0xC6),
    Color::rgb(0xE8, 0x40, 0xD8),
    Color::rgb(0xA8, 0xE0, 0x3C),
    Color::rgb(0x2F, 0x5C, 0xFF),
    Color::rgb(0xFF, 0x9E, 0xB0),
    Color::rgb(0xC8, 0xC8, 0xC8),
];

/// Hands out colors to new series and takes them back on removal
///
/// Colors are handed out in palette order. Once every color is taken the
/// palette starts over, so several series may share a color.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<Color>,
    // Stack of free colors, next color on top
    available: Vec<Color>,
}

impl ColorPalette {
    /// Create a palette from an ordered list of colors
    ///
    /// An empty list falls back to the default colors.
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            colors
        };
        let available = colors.iter().rev().copied().collect();
        Self { colors, available }
    }

    /// Take the next free color
    pub fn take(&mut self) -> Color {
        if self.available.is_empty() {
            self.available = self.colors.iter().rev().copied().collect();
        }
        // Refilled above, so there is always a color on the stack
        self.available.pop().unwrap_or(self.colors[0])
    }

    /// Return a color so it can be handed out again
    pub fn release(&mut self, color: Color) {
        if self.colors.contains(&color) && !self.available.contains(&color) {
            self.available.push(color);
        }
    }

    /// Number of colors not currently handed out
    pub fn available(&self) -> usize {
        self.available.len()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_in_order() {
        let mut palette = ColorPalette::default();
        assert_eq!(palette.take(), DEFAULT_COLORS[0]);
        assert_eq!(palette.take(), DEFAULT_COLORS[1]);
        assert_eq!(palette.available(), DEFAULT_COLORS.len() - 2);
    }

    #[test]
    fn test_release_reuses_color() {
        let mut palette = ColorPalette::default();
        let first = palette.take();
        let _second = palette.take();

        palette.release(first);
        assert_eq!(palette.take(), first);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut palette = ColorPalette::default();
        let color = palette.take();
        palette.release(color);
        palette.release(color);
        assert_eq!(palette.available(), DEFAULT_COLORS.len());

        palette.release(Color::rgb(1, 2, 3));
        assert_eq!(palette.available(), DEFAULT_COLORS.len());
    }

    #[test]
    fn test_cycles_when_exhausted() {
        let mut palette = ColorPalette::new(vec![Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)]);
        assert_eq!(palette.take(), Color::rgb(1, 1, 1));
        assert_eq!(palette.take(), Color::rgb(2, 2, 2));
        assert_eq!(palette.take(), Color::rgb(1, 1, 1));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0xFB, 0x15, 0x54).to_string(), "#FB1554");
    }
}
