pub mod color;
pub mod config;
pub mod palette;

pub use color::HexColor;
pub use config::{EditorConfig, ThemeMode};
pub use palette::{builtin_dark, builtin_light, ColorClass, PaletteColors, SyntaxPalette};
