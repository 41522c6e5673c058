/// Syntax palettes: one color per token color class, plus built-in presets.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Render category of a token. Every tokenizer kind maps onto one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Key,
    String,
    Number,
    Boolean,
    Null,
    Punctuation,
    Bracket,
    Symbol,
    /// Symbols inside prose (plain-text files) use a softer accent.
    Accent,
    Comment,
    Header,
    Url,
    Email,
    Section,
    ListItem,
    Indentation,
    DocumentMarker,
    Value,
    Text,
}

impl ColorClass {
    pub const ALL: [ColorClass; 19] = [
        ColorClass::Key,
        ColorClass::String,
        ColorClass::Number,
        ColorClass::Boolean,
        ColorClass::Null,
        ColorClass::Punctuation,
        ColorClass::Bracket,
        ColorClass::Symbol,
        ColorClass::Accent,
        ColorClass::Comment,
        ColorClass::Header,
        ColorClass::Url,
        ColorClass::Email,
        ColorClass::Section,
        ColorClass::ListItem,
        ColorClass::Indentation,
        ColorClass::DocumentMarker,
        ColorClass::Value,
        ColorClass::Text,
    ];
}

/// A named token-class to color table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxPalette {
    pub name: String,
    #[serde(default = "dark_colors")]
    pub colors: PaletteColors,
}

/// The color assigned to each class. Missing entries fall back to the dark preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteColors {
    pub key: HexColor,
    pub string: HexColor,
    pub number: HexColor,
    pub boolean: HexColor,
    pub null: HexColor,
    pub punctuation: HexColor,
    pub bracket: HexColor,
    pub symbol: HexColor,
    pub accent: HexColor,
    pub comment: HexColor,
    pub header: HexColor,
    pub url: HexColor,
    pub email: HexColor,
    pub section: HexColor,
    pub list_item: HexColor,
    pub indentation: HexColor,
    pub document_marker: HexColor,
    pub value: HexColor,
    pub text: HexColor,
    pub disabled_text: HexColor,
    pub background: HexColor,
}

impl Default for PaletteColors {
    fn default() -> Self {
        dark_colors()
    }
}

fn dark_colors() -> PaletteColors {
    PaletteColors {
        key: HexColor::from_argb(0xFF5CD0F3),
        string: HexColor::from_argb(0xFFE6DB74),
        number: HexColor::from_argb(0xFFAE81FF),
        boolean: HexColor::from_argb(0xFF569CD6),
        null: HexColor::from_argb(0xFFF92672),
        punctuation: HexColor::from_argb(0xFFAAAAAA),
        bracket: HexColor::from_argb(0xFFFFFF00),
        symbol: HexColor::from_argb(0xFFFF00FF),
        accent: HexColor::from_argb(0xFFFD971F),
        comment: HexColor::from_argb(0xFF6A9955),
        header: HexColor::from_argb(0xFFFFD700),
        url: HexColor::from_argb(0xFF66D9EF),
        email: HexColor::from_argb(0xFFA6E22E),
        section: HexColor::from_argb(0xFFFFD700),
        list_item: HexColor::from_argb(0xFFA6E22E),
        indentation: HexColor::from_argb(0xFF555555),
        document_marker: HexColor::from_argb(0xFFFFD700),
        value: HexColor::from_argb(0xFFE6DB74),
        text: HexColor::from_argb(0xFFFFFFFF),
        disabled_text: HexColor::from_argb(0xFFAAAAAA),
        background: HexColor::from_argb(0xFF2D2D2D),
    }
}

fn light_colors() -> PaletteColors {
    PaletteColors {
        key: HexColor::rgb(0, 92, 197),
        string: HexColor::rgb(163, 21, 21),
        number: HexColor::rgb(9, 134, 88),
        boolean: HexColor::rgb(0, 0, 255),
        null: HexColor::rgb(175, 0, 219),
        punctuation: HexColor::rgb(100, 100, 100),
        bracket: HexColor::rgb(121, 94, 38),
        symbol: HexColor::rgb(175, 0, 219),
        accent: HexColor::rgb(200, 90, 0),
        comment: HexColor::rgb(0, 128, 0),
        header: HexColor::rgb(128, 96, 0),
        url: HexColor::rgb(0, 112, 193),
        email: HexColor::rgb(56, 128, 0),
        section: HexColor::rgb(128, 96, 0),
        list_item: HexColor::rgb(56, 128, 0),
        indentation: HexColor::rgb(200, 200, 200),
        document_marker: HexColor::rgb(128, 96, 0),
        value: HexColor::rgb(163, 21, 21),
        text: HexColor::rgb(30, 30, 30),
        disabled_text: HexColor::rgb(150, 150, 150),
        background: HexColor::rgb(255, 255, 255),
    }
}

impl SyntaxPalette {
    /// Resolves the color for a class. Plain text is drawn with the disabled
    /// color when the editor is not editable.
    pub fn color(&self, class: ColorClass, editable: bool) -> HexColor {
        let c = &self.colors;
        match class {
            ColorClass::Key => c.key,
            ColorClass::String => c.string,
            ColorClass::Number => c.number,
            ColorClass::Boolean => c.boolean,
            ColorClass::Null => c.null,
            ColorClass::Punctuation => c.punctuation,
            ColorClass::Bracket => c.bracket,
            ColorClass::Symbol => c.symbol,
            ColorClass::Accent => c.accent,
            ColorClass::Comment => c.comment,
            ColorClass::Header => c.header,
            ColorClass::Url => c.url,
            ColorClass::Email => c.email,
            ColorClass::Section => c.section,
            ColorClass::ListItem => c.list_item,
            ColorClass::Indentation => c.indentation,
            ColorClass::DocumentMarker => c.document_marker,
            ColorClass::Value => c.value,
            ColorClass::Text if editable => c.text,
            ColorClass::Text => c.disabled_text,
        }
    }

    pub fn background(&self) -> HexColor {
        self.colors.background
    }
}

/// Built-in dark palette.
pub fn builtin_dark() -> SyntaxPalette {
    SyntaxPalette {
        name: "Dark".to_string(),
        colors: dark_colors(),
    }
}

/// Built-in light palette.
pub fn builtin_light() -> SyntaxPalette {
    SyntaxPalette {
        name: "Light".to_string(),
        colors: light_colors(),
    }
}
