//! Centralized Magenta & Cyan color theme for the Rapidshorts TUI.
//!
//! Truecolor constants plus the handful of composed styles the wizard and
//! status bar share.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Deep pink: focused borders and the generate button.
pub const PRIMARY: Color = Color::Rgb(0xFF, 0x14, 0x93);
/// Hot magenta: title.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xFF, 0x00, 0x80);
/// Purple: step connectors already passed.
pub const PRIMARY_DARK: Color = Color::Rgb(0x79, 0x28, 0xCA);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Cyan: selections and the current step.
pub const ACCENT: Color = Color::Rgb(0x00, 0xFF, 0xFF);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background for badges.
pub const BG_BASE: Color = Color::Rgb(0x14, 0x0A, 0x1E);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xF2, 0xE9, 0xF7);
/// Field labels, character counter.
pub const TEXT_MUTED: Color = Color::Rgb(0x9A, 0x8C, 0xA8);
/// Disabled button background, connectors ahead of the cursor.
pub const TEXT_DIM: Color = Color::Rgb(0x5C, 0x4F, 0x6B);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xFF, 0x4D, 0x6D);
pub const SUCCESS: Color = Color::Rgb(0x39, 0xE6, 0x9E);
pub const WARNING: Color = Color::Rgb(0xFF, 0xC8, 0x57);
pub const INFO: Color = Color::Rgb(0x7D, 0xD3, 0xFC);

// ── Composed styles ─────────────────────────────────────────────────────────

/// Bold accent text (titles, active items).
pub fn title() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Template list heading, modal accents.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Current step, selected option.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "Enter:next").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Enabled generate button.
pub fn button() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Generate button while a request is in flight.
pub fn button_disabled() -> Style {
    Style::default().fg(TEXT).bg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Blocks ──────────────────────────────────────────────────────────────────

/// Bordered box around the active step's widget.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_states_differ() {
        assert_ne!(button(), button_disabled());
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(highlight(), Style::default());
        assert_ne!(muted(), Style::default());
    }
}
