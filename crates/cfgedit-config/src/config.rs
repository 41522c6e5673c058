/// Editor configuration: load, save, merge, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::palette::{builtin_dark, builtin_light, SyntaxPalette};

const CONFIG_FILE_NAME: &str = "cfgedit.json";

/// Which built-in palette the editor renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    /// Resolves to dark; there is no platform theme query when headless.
    Auto,
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Rejects every buffer mutation when set.
    pub readonly_mode: bool,
    /// Typing an opening bracket or quote also inserts its closing pair.
    #[serde(alias = "hint")]
    pub auto_close_brackets: bool,
    #[serde(alias = "doSuggestions")]
    pub suggestions_enabled: bool,
    pub theme: ThemeMode,
    /// Paints the active palette's background behind highlighted text.
    pub render_background: bool,
    pub search_case_sensitive: bool,
    pub search_use_regex: bool,
    /// Undo depth (minimum 1).
    pub max_history: usize,
    pub history_group_timeout_ms: u64,
    pub scroll_margin: i32,
    pub gutter_width: i32,
    pub palettes: Vec<SyntaxPalette>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            readonly_mode: false,
            auto_close_brackets: true,
            suggestions_enabled: true,
            theme: ThemeMode::Dark,
            render_background: false,
            search_case_sensitive: false,
            search_use_regex: false,
            max_history: 100,
            history_group_timeout_ms: 500,
            scroll_margin: 10,
            gutter_width: 20,
            palettes: vec![builtin_dark(), builtin_light()],
        }
    }
}

impl EditorConfig {
    /// Returns the config file path inside the platform config directory,
    /// or the working directory when there is none.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("cfgedit").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any read or parse error without touching the file.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            return config;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| tracing::warn!("Failed to read config at {}: {e}", path.display()))
            .and_then(|contents| {
                serde_json::from_str::<EditorConfig>(&contents)
                    .map_err(|e| tracing::warn!("Failed to parse config at {}: {e}", path.display()))
            });

        let mut config = parsed.unwrap_or_default();
        config.sanitize();
        config.with_builtins_merged();
        config
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Ensures the built-in Dark and Light palettes are present.
    /// User palettes with matching names take priority.
    pub fn with_builtins_merged(&mut self) {
        if self.find_palette("Dark").is_none() {
            self.palettes.insert(0, builtin_dark());
        }
        if self.find_palette("Light").is_none() {
            let at = 1.min(self.palettes.len());
            self.palettes.insert(at, builtin_light());
        }
    }

    pub fn find_palette(&self, name: &str) -> Option<&SyntaxPalette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// The palette selected by `theme`.
    pub fn active_palette(&self) -> SyntaxPalette {
        let name = match self.theme {
            ThemeMode::Dark | ThemeMode::Auto => "Dark",
            ThemeMode::Light => "Light",
        };
        match self.find_palette(name) {
            Some(p) => p.clone(),
            None if name == "Light" => builtin_light(),
            None => builtin_dark(),
        }
    }

    /// Background fill for highlighted text, if `render_background` is on.
    pub fn background_color(&self) -> Option<HexColor> {
        self.render_background.then(|| self.active_palette().background())
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.max_history = self.max_history.max(1);
        self.scroll_margin = self.scroll_margin.max(0);
        self.gutter_width = self.gutter_width.max(0);
    }
}
