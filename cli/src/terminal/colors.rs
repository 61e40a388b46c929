use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const FASTEST: Color = Color::Green;
pub const SLOWEST: Color = Color::Red;
pub const FAILED: Color = Color::TrueColor { r: 150, g: 60, b: 60 };
pub const ADDRESS: Color = Color::TrueColor { r: 170, g: 150, b: 255 };
pub const DISTANCE: Color = Color::Cyan;
