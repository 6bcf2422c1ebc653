//! Theme colors for the TUI

use ratatui::style::Color;

/// Theme colors for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub cyan: Color,
    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,

    /// Accent for chat mode
    pub chat_accent: Color,
    /// Accent for ingest mode
    pub ingest_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default)
    pub fn catppuccin_mocha() -> Self {
        Self {
            border: Color::Rgb(49, 50, 68),

            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            text_muted: Color::Rgb(108, 112, 134),

            cyan: Color::Rgb(148, 226, 213),
            blue: Color::Rgb(137, 180, 250),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            red: Color::Rgb(243, 139, 168),

            chat_accent: Color::Rgb(137, 180, 250),
            ingest_accent: Color::Rgb(166, 227, 161),
        }
    }
}
