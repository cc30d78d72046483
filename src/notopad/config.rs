use crate::error::{NotopadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "notopad.toml";

pub const DEFAULT_FONT_NAME: &str = "Consolas";
pub const DEFAULT_FONT_SIZE: u16 = 12;
pub const MIN_FONT_SIZE: u16 = 8;
pub const MAX_FONT_SIZE: u16 = 72;
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Keys accepted by [`Settings::get`] and [`Settings::set`].
pub const KEYS: &[&str] = &[
    "editor.font_name",
    "editor.font_size",
    "editor.theme",
    "editor.word_wrap",
    "editor.auto_save",
    "editor.line_numbers",
    "editor.autosave_interval_secs",
    "appearance.window_width",
    "appearance.window_height",
    "appearance.theme_color",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = NotopadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(NotopadError::Config(format!("Unknown theme: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub font_name: String,
    pub font_size: u16,
    pub theme: Theme,
    pub word_wrap: bool,
    pub auto_save: bool,
    pub line_numbers: bool,
    pub autosave_interval_secs: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            theme: Theme::Light,
            word_wrap: true,
            auto_save: true,
            line_numbers: true,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub window_width: u32,
    pub window_height: u32,
    pub theme_color: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 700,
            theme_color: "blue".to_string(),
        }
    }
}

/// User preferences, stored as an INI-style TOML file with `[editor]` and
/// `[appearance]` sections. Missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor: EditorSettings,
    pub appearance: AppearanceSettings,
}

impl Settings {
    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotopadError::Io)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(content).map_err(|e| NotopadError::Config(e.to_string()))?;
        settings.editor.font_size = clamp_font_size(settings.editor.font_size);
        if settings.editor.autosave_interval_secs == 0 {
            settings.editor.autosave_interval_secs = DEFAULT_AUTOSAVE_INTERVAL_SECS;
        }
        Ok(settings)
    }

    /// Save settings to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotopadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content =
            toml::to_string_pretty(self).map_err(|e| NotopadError::Config(e.to_string()))?;
        fs::write(config_path, content).map_err(NotopadError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "editor.font_name" => self.editor.font_name.clone(),
            "editor.font_size" => self.editor.font_size.to_string(),
            "editor.theme" => self.editor.theme.to_string(),
            "editor.word_wrap" => self.editor.word_wrap.to_string(),
            "editor.auto_save" => self.editor.auto_save.to_string(),
            "editor.line_numbers" => self.editor.line_numbers.to_string(),
            "editor.autosave_interval_secs" => self.editor.autosave_interval_secs.to_string(),
            "appearance.window_width" => self.appearance.window_width.to_string(),
            "appearance.window_height" => self.appearance.window_height.to_string(),
            "appearance.theme_color" => self.appearance.theme_color.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "editor.font_name" => self.editor.font_name = value.to_string(),
            "editor.font_size" => {
                self.editor.font_size = clamp_font_size(parse_value(key, value)?)
            }
            "editor.theme" => self.editor.theme = value.parse()?,
            "editor.word_wrap" => self.editor.word_wrap = parse_value(key, value)?,
            "editor.auto_save" => self.editor.auto_save = parse_value(key, value)?,
            "editor.line_numbers" => self.editor.line_numbers = parse_value(key, value)?,
            "editor.autosave_interval_secs" => {
                let secs: u64 = parse_value(key, value)?;
                if secs == 0 {
                    return Err(NotopadError::Config(
                        "Autosave interval must be at least one second".to_string(),
                    ));
                }
                self.editor.autosave_interval_secs = secs;
            }
            "appearance.window_width" => self.appearance.window_width = parse_value(key, value)?,
            "appearance.window_height" => {
                self.appearance.window_height = parse_value(key, value)?
            }
            "appearance.theme_color" => self.appearance.theme_color = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

pub fn clamp_font_size(size: u16) -> u16 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NotopadError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn unknown_key(key: &str) -> NotopadError {
    NotopadError::Config(format!(
        "Unknown setting: {} (known: {})",
        key,
        KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.editor.font_name, "Consolas");
        assert_eq!(settings.editor.font_size, 12);
        assert_eq!(settings.editor.theme, Theme::Light);
        assert_eq!(settings.editor.autosave_interval_secs, 30);
        assert_eq!(settings.appearance.window_width, 1000);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.editor.theme = Theme::Dark;
        settings.editor.font_size = 16;
        settings.save(dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(raw.contains("[editor]"));
        assert!(raw.contains("[appearance]"));

        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::parse("[editor]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(settings.editor.theme, Theme::Dark);
        assert_eq!(settings.editor.font_name, "Consolas");
        assert_eq!(settings.appearance, AppearanceSettings::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "[editor\nfont_size = big").unwrap();

        assert!(matches!(
            Settings::load(dir.path()),
            Err(NotopadError::Config(_))
        ));
    }

    #[test]
    fn test_font_size_is_clamped_on_load() {
        let settings = Settings::parse("[editor]\nfont_size = 200\n").unwrap();
        assert_eq!(settings.editor.font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut settings = Settings::default();
        settings.set("editor.theme", "Dark").unwrap();
        settings.set("editor.word_wrap", "false").unwrap();
        settings.set("appearance.window_width", "1280").unwrap();

        assert_eq!(settings.get("editor.theme").unwrap(), "dark");
        assert_eq!(settings.get("editor.word_wrap").unwrap(), "false");
        assert_eq!(settings.get("appearance.window_width").unwrap(), "1280");
    }

    #[test]
    fn test_every_key_is_readable() {
        let settings = Settings::default();
        for key in KEYS {
            assert!(settings.get(key).is_ok(), "{} should be readable", key);
        }
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("editor.font_size", "huge").is_err());
        assert!(settings.set("editor.theme", "solarized").is_err());
        assert!(settings.set("editor.autosave_interval_secs", "0").is_err());
        assert!(settings.set("nope.key", "1").is_err());
        assert_eq!(settings, Settings::default());
    }
}
