//! Application settings types and persistence
//!
//! This module handles the theme color, the settle mode and loading/saving
//! the JSON settings file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::session::{clamp_dice_count, MIN_DICE};

pub const DEFAULT_THEME: &str = "#ff4757";
pub const DEFAULT_SETTINGS_FILE: &str = "dicetray_settings.json";

/// Swatches offered by the theme cycle key.
pub const THEME_PRESETS: [&str; 6] = [
    "#ff4757", "#2ed573", "#1e90ff", "#ffa502", "#a55eea", "#ffffff",
];

/// Perceived brightness above which a color counts as light.
const LIGHT_BRIGHTNESS_THRESHOLD: f32 = 180.0;

// ============================================================================
// Theme color
// ============================================================================

/// A parsed CSS color used for dice faces and UI accents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    name: String,
    rgba: [u8; 4],
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            rgba: [0xff, 0x47, 0x57, 0xff],
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl ThemeColor {
    /// Parse any CSS color: "#ff4757", "white", "rgb(30, 144, 255)", ...
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let color = csscolorparser::parse(input)
            .map_err(|e| format!("Invalid theme color '{}': {}", input, e))?;

        Ok(Self {
            name: input.to_lowercase(),
            rgba: color.to_rgba8(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgba8(&self) -> [u8; 4] {
        self.rgba
    }

    pub fn is_white(&self) -> bool {
        self.rgba[..3] == [0xff, 0xff, 0xff]
    }

    /// Perceived brightness in 0..=255.
    pub fn brightness(&self) -> f32 {
        let [r, g, b, _] = self.rgba;
        (r as f32 * 299.0 + g as f32 * 587.0 + b as f32 * 114.0) / 1000.0
    }

    pub fn is_light(&self) -> bool {
        self.brightness() > LIGHT_BRIGHTNESS_THRESHOLD
    }

    pub fn to_color(&self) -> Color {
        let [r, g, b, a] = self.rgba;
        Color::srgba_u8(r, g, b, a)
    }

    /// Text color readable on top of this color.
    pub fn contrast_text_color(&self) -> Color {
        if self.is_light() {
            Color::srgb_u8(0x11, 0x11, 0x11)
        } else {
            Color::WHITE
        }
    }

    /// The preset after this one, wrapping around. Unknown colors start over
    /// at the first preset.
    pub fn next_preset(&self) -> ThemeColor {
        let next = THEME_PRESETS
            .iter()
            .position(|preset| *preset == self.name)
            .map(|i| (i + 1) % THEME_PRESETS.len())
            .unwrap_or(0);

        ThemeColor::parse(THEME_PRESETS[next]).unwrap_or_default()
    }
}

/// The theme new dice are created with.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct DiceTheme(pub ThemeColor);

// ============================================================================
// Settle mode
// ============================================================================

/// How a roll decides its dice have stopped.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleMode {
    /// Read faces when the fixed settle timer elapses.
    #[default]
    Timeout,
    /// Also read faces early once every die has come to rest.
    AtRestOrTimeout,
}

// ============================================================================
// Persistent settings
// ============================================================================

/// Application settings (persisted as JSON).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_dice_count")]
    pub dice_count: u32,

    #[serde(default)]
    pub settle_mode: SettleMode,

    /// Fixed seed for reproducible throws. Entropy-seeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_dice_count() -> u32 {
    MIN_DICE
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            dice_count: default_dice_count(),
            settle_mode: SettleMode::default(),
            seed: None,
        }
    }
}

impl AppSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    pub fn theme_color(&self) -> Result<ThemeColor, String> {
        ThemeColor::parse(&self.theme)
    }

    pub fn clamped_dice_count(&self) -> u32 {
        clamp_dice_count(self.dice_count)
    }
}

/// Where settings are saved back to.
#[derive(Resource, Debug, Clone)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        Self(PathBuf::from(DEFAULT_SETTINGS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_parse_hex() {
        let color = ThemeColor::parse("#1E90FF").expect("valid hex");
        assert_eq!(color.rgba8(), [0x1e, 0x90, 0xff, 0xff]);
        assert_eq!(color.name(), "#1e90ff");
    }

    #[test]
    fn test_theme_color_parse_named() {
        let color = ThemeColor::parse("white").expect("valid name");
        assert!(color.is_white());
        assert!(color.is_light());
    }

    #[test]
    fn test_theme_color_parse_invalid() {
        assert!(ThemeColor::parse("not-a-color").is_err());
        assert!(ThemeColor::parse("").is_err());
    }

    #[test]
    fn test_default_theme_matches_constant() {
        assert_eq!(ThemeColor::parse(DEFAULT_THEME), Ok(ThemeColor::default()));
    }

    #[test]
    fn test_brightness_threshold() {
        assert!(!ThemeColor::default().is_light());
        assert!(ThemeColor::parse("#ffff00").map(|c| c.is_light()).unwrap_or(false));
        assert!(!ThemeColor::parse("#1e90ff").map(|c| c.is_light()).unwrap_or(true));
    }

    #[test]
    fn test_next_preset_cycles() {
        let mut theme = ThemeColor::default();
        let mut seen = Vec::new();
        for _ in 0..THEME_PRESETS.len() {
            theme = theme.next_preset();
            seen.push(theme.name().to_string());
        }
        assert_eq!(seen.last().map(String::as_str), Some(DEFAULT_THEME));
        assert_eq!(seen.len(), THEME_PRESETS.len());
    }

    #[test]
    fn test_next_preset_from_custom_color() {
        let custom = ThemeColor::parse("#123456").expect("valid hex");
        assert_eq!(custom.next_preset().name(), THEME_PRESETS[0]);
    }

    #[test]
    fn test_settings_defaults_for_missing_fields() {
        let settings = AppSettings::from_json("{}").expect("empty object is valid");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_settings_parse_settle_mode() {
        let settings =
            AppSettings::from_json(r#"{"settle_mode": "at_rest_or_timeout", "dice_count": 3}"#)
                .expect("valid settings");
        assert_eq!(settings.settle_mode, SettleMode::AtRestOrTimeout);
        assert_eq!(settings.dice_count, 3);
    }

    #[test]
    fn test_settings_invalid_theme_is_an_error() {
        let settings = AppSettings {
            theme: "bogus".to_string(),
            ..default()
        };
        assert!(settings.theme_color().is_err());
        assert_eq!(AppSettings::default().theme_color(), Ok(ThemeColor::default()));
    }

    #[test]
    fn test_settings_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "dicetray_settings_test_{}.json",
            std::process::id()
        ));
        let settings = AppSettings {
            theme: "#a55eea".to_string(),
            dice_count: 4,
            settle_mode: SettleMode::AtRestOrTimeout,
            seed: Some(7),
        };

        settings.save(&path).expect("save settings");
        let loaded = AppSettings::load(&path).expect("load settings");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_settings_missing_file_is_default() {
        let path = std::env::temp_dir().join("dicetray_settings_does_not_exist.json");
        assert_eq!(AppSettings::load(&path), Ok(AppSettings::default()));
    }

    #[test]
    fn test_settings_malformed_file_is_an_error() {
        assert!(AppSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_settings_clamps_dice_count() {
        let settings = AppSettings {
            dice_count: 9,
            ..default()
        };
        assert_eq!(settings.clamped_dice_count(), 5);
    }

    #[test]
    fn test_seed_is_omitted_when_absent() {
        let json = AppSettings::default().to_json().expect("serializable");
        assert!(!json.contains("seed"));
    }
}
