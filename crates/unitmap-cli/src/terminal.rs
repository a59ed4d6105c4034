//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting.

use unitmap_lib::Rgb;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse yellow for highlighted-unit tags.
    pub const TAG_HIGHLIGHT: &str = "\x1b[1;7;33m";
    /// Bright bold white for emphasis (unit ids).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (coordinates, counts).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for query parameters.
    pub const CYAN: &str = "\x1b[36m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_highlight: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    /// Whether unit colors are rendered as 24-bit swatches.
    pub truecolor: bool,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_highlight: colors::TAG_HIGHLIGHT,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            truecolor: true,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_highlight: "",
            white_bold: "",
            gray: "",
            cyan: "",
            truecolor: false,
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// A colored block for `rgb`, or an empty string for plain output.
    pub fn swatch(&self, rgb: Rgb) -> String {
        if self.truecolor {
            format!(
                "\x1b[38;2;{};{};{}m■{} ",
                rgb.red, rgb.green, rgb.blue, self.reset
            )
        } else {
            String::new()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
