use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::notes::NoteGrid;
use crate::GameMap;

/// Difficulty presets, each a fixed pipe spawn interval in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easiest,
    #[default]
    Easy,
    Medium,
    Hard,
    Hardest,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easiest,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Hardest,
    ];

    /// Frames between pipe spawns (3.0s down to 1.0s at 60 FPS)
    pub fn spawn_interval(self) -> u32 {
        match self {
            Difficulty::Easiest => 180,
            Difficulty::Easy => 150,
            Difficulty::Medium => 120,
            Difficulty::Hard => 90,
            Difficulty::Hardest => 60,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easiest => "easiest",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Hardest => "hardest",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| SettingsError::UnknownDifficulty(s.to_string()))
    }
}

/// Player-tunable settings.
///
/// A `Settings` value is an immutable snapshot: edits produce a new value and
/// the owner of the game loop decides when to hand it to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub min_freq: f32,
    pub max_freq: f32,
    pub gap_multiplier: f32, // gap height as a multiple of bird height
    pub pipe_speed: f32,     // pixels per frame
    pub glide_speed: f32,    // descent in pixels per frame when not whistling
    pub difficulty: Difficulty,
    pub pipe_spawn_interval: u32, // frames
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_freq: 440.0,
            max_freq: 830.61,
            gap_multiplier: 3.0,
            pipe_speed: 2.0,
            glide_speed: 1.5,
            difficulty: Difficulty::Easy,
            pipe_spawn_interval: Difficulty::Easy.spawn_interval(),
        }
    }
}

// Slider bounds
const GAP_MULTIPLIER: (f32, f32) = (2.0, 5.0);
const PIPE_SPEED: (f32, f32) = (1.0, 4.0);
const GLIDE_SPEED: (f32, f32) = (0.5, 3.0);
const SPAWN_INTERVAL: (f32, f32) = (1.0, 600.0);

fn check_range(key: &'static str, value: f32, (min, max): (f32, f32)) -> Result<f32, SettingsError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(SettingsError::OutOfRange {
            key,
            value,
            min,
            max,
        })
    }
}

/// Wire shape for settings coming from the page; absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SettingsPatch {
    min_freq: Option<f32>,
    max_freq: Option<f32>,
    gap_multiplier: Option<f32>,
    pipe_speed: Option<f32>,
    #[serde(alias = "gravity")]
    glide_speed: Option<f32>,
    difficulty: Option<Difficulty>,
    pipe_spawn_interval: Option<u32>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with one numeric setting replaced.
    ///
    /// Keys use the page's camelCase names; `gravity` is accepted as the
    /// settings panel's name for the glide speed slider.
    pub fn with(&self, key: &str, value: f32) -> Result<Self, SettingsError> {
        let mut next = self.clone();
        match key {
            "gapMultiplier" => {
                next.gap_multiplier = check_range("gapMultiplier", value, GAP_MULTIPLIER)?
            }
            "pipeSpeed" => next.pipe_speed = check_range("pipeSpeed", value, PIPE_SPEED)?,
            "glideSpeed" | "gravity" => {
                next.glide_speed = check_range("glideSpeed", value, GLIDE_SPEED)?
            }
            "pipeSpawnInterval" => {
                next.pipe_spawn_interval =
                    check_range("pipeSpawnInterval", value, SPAWN_INTERVAL)?.round() as u32
            }
            "minFreq" => next.min_freq = value,
            "maxFreq" => next.max_freq = value,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        next.validate()?;
        log::info!("Setting updated: {} = {}", key, value);
        Ok(next)
    }

    /// Return a copy using a named difficulty preset and its spawn interval
    pub fn with_difficulty(&self, level: &str) -> Result<Self, SettingsError> {
        let difficulty = level.parse::<Difficulty>().inspect_err(|e| {
            log::error!("{}", e);
        })?;
        log::info!(
            "Difficulty set to {}: {} frames",
            difficulty,
            difficulty.spawn_interval()
        );
        Ok(Self {
            difficulty,
            pipe_spawn_interval: difficulty.spawn_interval(),
            ..self.clone()
        })
    }

    /// Parse a (possibly partial) settings object, filling gaps from defaults.
    ///
    /// A difficulty without an explicit interval implies that preset's interval.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let patch: SettingsPatch = serde_json::from_str(json)?;
        let defaults = Self::default();
        let difficulty = patch.difficulty.unwrap_or(defaults.difficulty);
        let settings = Self {
            min_freq: patch.min_freq.unwrap_or(defaults.min_freq),
            max_freq: patch.max_freq.unwrap_or(defaults.max_freq),
            gap_multiplier: patch.gap_multiplier.unwrap_or(defaults.gap_multiplier),
            pipe_speed: patch.pipe_speed.unwrap_or(defaults.pipe_speed),
            glide_speed: patch.glide_speed.unwrap_or(defaults.glide_speed),
            difficulty,
            pipe_spawn_interval: patch
                .pipe_spawn_interval
                .unwrap_or_else(|| difficulty.spawn_interval()),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Defaults, as a fresh snapshot
    pub fn reset() -> Self {
        log::info!("Settings reset to defaults");
        Self::default()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_freq > 0.0 && self.min_freq < self.max_freq && self.max_freq.is_finite()) {
            return Err(SettingsError::InvalidRange {
                min: self.min_freq,
                max: self.max_freq,
            });
        }
        check_range("gapMultiplier", self.gap_multiplier, GAP_MULTIPLIER)?;
        check_range("pipeSpeed", self.pipe_speed, PIPE_SPEED)?;
        check_range("glideSpeed", self.glide_speed, GLIDE_SPEED)?;
        check_range(
            "pipeSpawnInterval",
            self.pipe_spawn_interval as f32,
            SPAWN_INTERVAL,
        )?;
        Ok(())
    }

    /// Whether `freq` lies in the playable band (inclusive)
    pub fn in_range(&self, freq: f32) -> bool {
        freq >= self.min_freq && freq <= self.max_freq
    }
}

/// Quantities recomputed from a settings snapshot by `apply_settings`
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub notes: NoteGrid,
    pub pipe_gap: f32, // pixels, captured by each pipe at spawn
}

impl Derived {
    pub fn from_settings(settings: &Settings, map: &GameMap) -> Self {
        Self {
            notes: NoteGrid::build(settings.min_freq, settings.max_freq),
            pipe_gap: map.bird_size.y * settings.gap_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_easy_preset() {
        let settings = Settings::new();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.pipe_spawn_interval, 150);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_difficulty_intervals() {
        let intervals: Vec<u32> = Difficulty::ALL.iter().map(|d| d.spawn_interval()).collect();
        assert_eq!(intervals, vec![180, 150, 120, 90, 60]);
    }

    #[test]
    fn test_with_difficulty_sets_interval() {
        let settings = Settings::new().with_difficulty("hardest").unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hardest);
        assert_eq!(settings.pipe_spawn_interval, 60);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let settings = Settings::new();
        let err = settings.with_difficulty("nightmare").unwrap_err();
        assert_eq!(err, SettingsError::UnknownDifficulty("nightmare".into()));
        assert_eq!(settings, Settings::new(), "Original snapshot untouched");
    }

    #[test]
    fn test_with_updates_single_key() {
        let settings = Settings::new().with("pipeSpeed", 3.5).unwrap();
        assert_eq!(settings.pipe_speed, 3.5);
        assert_eq!(settings.gap_multiplier, 3.0);
    }

    #[test]
    fn test_gravity_alias_sets_glide_speed() {
        let settings = Settings::new().with("gravity", 2.5).unwrap();
        assert_eq!(settings.glide_speed, 2.5);
    }

    #[test]
    fn test_from_json_accepts_gravity_key() {
        let settings = Settings::from_json(r#"{"gravity": 2.5}"#).unwrap();
        assert_eq!(settings.glide_speed, 2.5);
        assert_eq!(settings, Settings::new().with("gravity", 2.5).unwrap());
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let err = Settings::new().with("gapMultiplier", 9.0).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                key: "gapMultiplier",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::new().with("flapStrength", 1.0).unwrap_err();
        assert_eq!(err, SettingsError::UnknownKey("flapStrength".into()));
    }

    #[test]
    fn test_inverted_frequency_range_rejected() {
        let err = Settings::new().with("minFreq", 900.0).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidRange { .. }));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"pipeSpeed": 3, "difficulty": "hard"}"#).unwrap();
        assert_eq!(settings.pipe_speed, 3.0);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.pipe_spawn_interval, 90);
        assert_eq!(settings.min_freq, 440.0);
    }

    #[test]
    fn test_from_json_rejects_unknown_difficulty() {
        let err = Settings::from_json(r#"{"difficulty": "impossible"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_json_output_uses_page_names() {
        let json = Settings::new().to_json().unwrap();
        assert!(json.contains("\"pipeSpawnInterval\":150"));
        assert!(json.contains("\"difficulty\":\"easy\""));
        assert_eq!(Settings::from_json(&json).unwrap(), Settings::new());
    }

    #[test]
    fn test_derived_gap_is_bird_height_multiple() {
        let map = GameMap::new();
        let derived = Derived::from_settings(&Settings::new(), &map);
        assert_eq!(derived.pipe_gap, 72.0);
        assert_eq!(derived.notes.notes().len(), 12);
    }
}
