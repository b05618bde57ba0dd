//! Catppuccin color palettes for the TUI.

use ratatui::style::Color;

/// Colors for tracks, boxes and the status line.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Track background, also used as box text.
    pub base: Color,
    /// Status line background.
    pub surface: Color,

    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    /// Key hints and the app name.
    pub primary: Color,

    /// Box fill per event kind.
    pub value_box: Color,
    pub completed_box: Color,
    pub error_box: Color,

    /// Host state label while attached.
    pub attached: Color,

    pub border: Color,
    pub border_attached: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Dark palette (Mocha).
    pub fn mocha() -> Self {
        let lavender = Color::Rgb(180, 190, 254);
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            text: Color::Rgb(205, 214, 244),
            subtext: Color::Rgb(166, 173, 200),
            muted: Color::Rgb(108, 112, 134),
            primary: lavender,
            value_box: Color::Rgb(137, 180, 250),     // blue
            completed_box: Color::Rgb(127, 132, 156), // overlay1
            error_box: Color::Rgb(243, 139, 168),     // red
            attached: Color::Rgb(166, 227, 161),      // green
            border: Color::Rgb(69, 71, 90),
            border_attached: lavender,
        }
    }

    /// Light palette (Latte).
    pub fn latte() -> Self {
        let lavender = Color::Rgb(114, 135, 253);
        Self {
            base: Color::Rgb(239, 241, 245),
            surface: Color::Rgb(230, 233, 239),
            text: Color::Rgb(76, 79, 105),
            subtext: Color::Rgb(92, 95, 119),
            muted: Color::Rgb(140, 143, 161),
            primary: lavender,
            value_box: Color::Rgb(30, 102, 245),      // blue
            completed_box: Color::Rgb(140, 143, 161), // overlay1
            error_box: Color::Rgb(210, 15, 57),       // red
            attached: Color::Rgb(64, 160, 43),        // green
            border: Color::Rgb(188, 192, 204),
            border_attached: lavender,
        }
    }
}
