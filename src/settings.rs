//! Game settings and tuning
//!
//! Loaded from a JSON file; anything missing falls back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::SimConfig;

/// Settings loading errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value outside its allowed range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Level index the run starts at (clamped to the catalog)
    pub start_level: usize,

    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Word hunt ===
    /// Word to spell, uppercase ASCII
    pub target_word: String,
    /// Probability a letter spawn picks a still-needed letter
    pub letter_bias: f64,
    /// Probability a collecting-phase item is a shield
    pub powerup_chance: f64,

    // === Visual Effects ===
    /// Particle effects (explosions, sparks, etc.)
    pub particles: bool,
    pub max_particles: usize,

    // === Demo ===
    /// Let the AI fly
    pub autopilot: bool,
    /// Frames the headless driver runs before giving up
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 0,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            target_word: "GEMINI".to_string(),
            letter_bias: 0.6,
            powerup_chance: 0.3,

            particles: true,
            max_particles: 512,

            autopilot: true,
            demo_frames: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_word.is_empty() || !self.target_word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SettingsError::Invalid(format!(
                "target_word must be non-empty ASCII letters, got {:?}",
                self.target_word
            )));
        }
        for (name, p) in [("letter_bias", self.letter_bias), ("powerup_chance", self.powerup_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SettingsError::Invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { self.max_particles }
    }

    /// Simulation tunables derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            width: self.screen_width,
            height: self.screen_height,
            target_word: self.target_word.to_ascii_uppercase().chars().collect(),
            letter_bias: self.letter_bias,
            powerup_chance: self.powerup_chance,
            max_particles: self.max_particles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"target_word": "rust", "seed": 7}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.letter_bias, 0.6);
        assert_eq!(settings.sim_config().target_word, vec!['R', 'U', 'S', 'T']);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let settings = Settings {
            letter_bias: 1.5,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_word() {
        let settings = Settings {
            target_word: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_particles_toggle_zeroes_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.sim_config().max_particles, 0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/wordwing.json");
        assert_eq!(settings.target_word, "GEMINI");
        assert!(matches!(
            Settings::load("/nonexistent/wordwing.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("wordwing-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(42),
            start_level: 2,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.seed, Some(42));
        assert_eq!(loaded.start_level, 2);
        let _ = std::fs::remove_file(&path);
    }
}
