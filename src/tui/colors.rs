// Color palette for the TUI
use ratatui::style::Color;

/// Pass / reject accent
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 68, 68);
/// Apply / accept accent
pub const ACCENT_SECONDARY: Color = Color::Rgb(34, 197, 94);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(139, 92, 246);

pub const TEXT_PRIMARY: Color = Color::Rgb(229, 231, 235);
pub const TEXT_SECONDARY: Color = Color::Rgb(156, 163, 175);

pub const BG_DARK: Color = Color::Rgb(17, 24, 39);
pub const BORDER_COLOR: Color = Color::Rgb(75, 85, 99);
