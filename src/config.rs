//! Game rules and tuning
//!
//! Read once at startup from an optional JSON block in the page:
//! `<script id="game-config" type="application/json">{ ... }</script>`.
//! Any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::Level;

/// Tunable game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Level scaling ===
    /// Starting life at level 1
    pub base_life: u32,
    /// Life removed from the starting pool per level above 1
    pub life_step: u32,
    /// Balls spawned per level (level 2 spawns twice as many)
    pub base_ball_count: u32,
    /// Highest selectable level
    pub max_level: u32,

    // === Rules ===
    /// Life lost on every wrong click
    pub miss_penalty: u32,
    /// End the round as a loss as soon as life hits zero
    /// (off: the round runs until the end-game click)
    pub end_on_depleted_life: bool,
    /// Smallest target divisor
    pub divisor_min: u32,
    /// Largest target divisor
    pub divisor_max: u32,
    /// Largest number printed on a ball (smallest is 1)
    pub number_max: u32,

    // === Animation ===
    /// Interval between movement ticks (ms)
    pub tick_interval_ms: u32,
    /// Ball diameter (px)
    pub ball_size: f32,
    /// Distance a ball travels per tick (px)
    pub ball_speed: f32,

    // === Audio ===
    /// Play sounds at all
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Sample played on a wrong click; procedural tone when unset
    pub error_sound_url: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_life: 100,
            life_step: 10,
            base_ball_count: 10,
            max_level: 5,

            miss_penalty: 10,
            end_on_depleted_life: false,
            divisor_min: 2,
            divisor_max: 9,
            number_max: 100,

            tick_interval_ms: 200,
            ball_size: 50.0,
            ball_speed: 12.0,

            sound: true,
            volume: 0.8,
            error_sound_url: None,
        }
    }
}

fn invalid(msg: impl Into<String>) -> Result<(), GameError> {
    Err(GameError::InvalidConfig(msg.into()))
}

impl GameConfig {
    /// Element id of the optional JSON config block
    pub const ELEMENT_ID: &'static str = "game-config";

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GameError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject rule combinations that make a level unplayable
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_level == 0 {
            return invalid("max_level must be at least 1");
        }
        if self.base_ball_count == 0 {
            return invalid("base_ball_count must be at least 1");
        }
        if self.divisor_min < 2 {
            return invalid("divisor_min must be at least 2");
        }
        if self.divisor_min > self.divisor_max {
            return invalid(format!(
                "divisor range {}..={} is empty",
                self.divisor_min, self.divisor_max
            ));
        }
        if self.number_max < self.divisor_max {
            return invalid(format!(
                "number_max {} cannot hold a multiple of {}",
                self.number_max, self.divisor_max
            ));
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be positive");
        }
        if !(self.ball_size > 0.0) || !(self.ball_speed >= 0.0) {
            return invalid("ball_size must be positive and ball_speed non-negative");
        }
        let top = Level::new(self.max_level, self.max_level)?;
        if self.starting_life_for(top) == 0 {
            return invalid(format!(
                "level {} would start with no life",
                self.max_level
            ));
        }
        Ok(())
    }

    /// Number of balls for a level
    pub fn ball_count_for(&self, level: Level) -> u32 {
        level.get().saturating_mul(self.base_ball_count)
    }

    /// Starting life for a level
    pub fn starting_life_for(&self, level: Level) -> u32 {
        let drop = (level.get() - 1).saturating_mul(self.life_step);
        self.base_life.saturating_sub(drop)
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load the config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from page");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring game config: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u32) -> Level {
        Level::new(n, 5).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ball_count_scales_with_level() {
        let config = GameConfig::default();
        assert_eq!(config.ball_count_for(level(1)), 10);
        assert_eq!(config.ball_count_for(level(3)), 30);
        assert_eq!(config.ball_count_for(level(5)), 50);
    }

    #[test]
    fn test_starting_life_drops_with_level() {
        let config = GameConfig::default();
        assert_eq!(config.starting_life_for(level(1)), 100);
        assert_eq!(config.starting_life_for(level(2)), 90);
        assert_eq!(config.starting_life_for(level(5)), 60);
    }

    #[test]
    fn test_starting_life_saturates() {
        let config = GameConfig {
            base_life: 15,
            ..Default::default()
        };
        assert_eq!(config.starting_life_for(level(3)), 0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "base_life": 120, "max_level": 3 }"#).unwrap();
        assert_eq!(config.base_life, 120);
        assert_eq!(config.max_level, 3);
        assert_eq!(config.miss_penalty, 10);
        assert_eq!(config.tick_interval_ms, 200);
        assert!(config.error_sound_url.is_none());
    }

    #[test]
    fn test_error_sound_url_from_json() {
        let config =
            GameConfig::from_json(r#"{ "error_sound_url": "sound/error.wav" }"#).unwrap();
        assert_eq!(config.error_sound_url.as_deref(), Some("sound/error.wav"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ base_life: ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_empty_divisor_range() {
        let err = GameConfig::from_json(r#"{ "divisor_min": 7, "divisor_max": 3 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_divisor_of_one() {
        let config = GameConfig {
            divisor_min: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_level_without_life() {
        let config = GameConfig {
            base_life: 40,
            max_level: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_runs_until_end_click_by_default() {
        assert!(!GameConfig::default().end_on_depleted_life);
        let config = GameConfig::from_json(r#"{ "end_on_depleted_life": true }"#).unwrap();
        assert!(config.end_on_depleted_life);
    }

    #[test]
    fn test_sound_off_mutes() {
        let config = GameConfig {
            sound: false,
            ..Default::default()
        };
        assert_eq!(config.effective_volume(), 0.0);
        assert_eq!(GameConfig::default().effective_volume(), 0.8);
    }
}
