use ratatui::style::Color;

pub const BACKGROUND: Color = Color::Rgb(3, 7, 18);
pub const PANEL: Color = Color::Rgb(6, 9, 19);
pub const PANEL_MUTED: Color = Color::Rgb(9, 11, 18);
pub const BORDER: Color = Color::Rgb(31, 42, 55);
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const TEXT_DIM: Color = Color::Rgb(148, 163, 184);
pub const ACCENT: Color = Color::Rgb(56, 189, 248);
pub const SUCCESS: Color = Color::Rgb(127, 209, 141);
pub const ERROR: Color = Color::Rgb(248, 113, 113);
/// Text drawn on top of the accent-colored cursor.
pub const CURSOR_TEXT: Color = Color::Rgb(2, 6, 23);
