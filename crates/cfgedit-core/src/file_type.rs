/// File-extension to tokenizer binding.
use std::path::Path;

/// The formats the editor knows how to tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileType {
    Json,
    Json5,
    Yaml,
    Toml,
    Properties,
    Cfg,
    Ini,
    Text,
    /// Unknown extension: lines are passed through as plain text.
    #[default]
    Plain,
}

impl FileType {
    /// Maps an extension (without the dot) to a file type, ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "json5" => Self::Json5,
            "yml" | "yaml" => Self::Yaml,
            "toml" => Self::Toml,
            "properties" => Self::Properties,
            "cfg" => Self::Cfg,
            "ini" => Self::Ini,
            "txt" => Self::Text,
            _ => Self::Plain,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// JSON validation and completion only run for these.
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::Json5)
    }
}
