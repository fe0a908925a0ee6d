// config.rs - Tunable constants for the board, speed table and palette

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Palette;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("array size must be at least 1, got {0}")]
    ArraySize(usize),
    #[error("size step must be at least 1")]
    SizeStep,
    #[error("board size range {min}..={max} is invalid for an array of {array_size}")]
    SizeRange {
        min: usize,
        max: usize,
        array_size: usize,
    },
    #[error("initial board size {0} lies outside the configured range")]
    InitialSize(usize),
    #[error("speed level range {min}..={max} is invalid")]
    SpeedRange { min: u32, max: u32 },
    #[error("initial speed level {0} lies outside the configured range")]
    InitialSpeed(u32),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Side of the fixed backing array.
    pub array_size: usize,
    /// Board sizes are multiples of this.
    pub size_step: usize,
    pub min_game_size: usize,
    pub max_game_size: usize,
    pub initial_game_size: usize,
    pub min_speed_level: u32,
    pub max_speed_level: u32,
    pub initial_speed_level: u32,
    /// Pixels kept free between the board and the container edge.
    pub board_margin: f32,
    /// Width of the steps-per-second counting window.
    pub rate_window_ms: u64,
    pub palette: Palette,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            array_size: 200,
            size_step: 5,
            min_game_size: 5,
            max_game_size: 100,
            initial_game_size: 50,
            min_speed_level: 1,
            max_speed_level: 10,
            initial_speed_level: 5,
            board_margin: 3.0,
            rate_window_ms: 1000,
            palette: Palette::default(),
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_size == 0 {
            return Err(ConfigError::ArraySize(self.array_size));
        }
        if self.size_step == 0 {
            return Err(ConfigError::SizeStep);
        }
        if self.min_game_size == 0
            || self.min_game_size > self.max_game_size
            || self.max_game_size > self.array_size
        {
            return Err(ConfigError::SizeRange {
                min: self.min_game_size,
                max: self.max_game_size,
                array_size: self.array_size,
            });
        }
        if !(self.min_game_size..=self.max_game_size).contains(&self.initial_game_size) {
            return Err(ConfigError::InitialSize(self.initial_game_size));
        }
        // log10 of the level drives the interval, so level 0 is meaningless
        if self.min_speed_level == 0 || self.min_speed_level > self.max_speed_level {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed_level,
                max: self.max_speed_level,
            });
        }
        if !(self.min_speed_level..=self.max_speed_level).contains(&self.initial_speed_level) {
            return Err(ConfigError::InitialSpeed(self.initial_speed_level));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Clamp a requested board size into range and snap it to the size step.
    /// An inverted range is read with its bounds swapped.
    pub fn clamp_game_size(&self, requested: usize) -> usize {
        let step = self.size_step.max(1);
        let lo = self.min_game_size.min(self.max_game_size);
        let hi = self.min_game_size.max(self.max_game_size);
        let clamped = requested.clamp(lo, hi);
        let snapped = (clamped + step / 2) / step * step;
        snapped.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LifeConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LifeConfig::from_json_str(r#"{ "initial_game_size": 20 }"#)
            .expect("partial config parses");
        assert_eq!(config.initial_game_size, 20);
        assert_eq!(config.array_size, 200);
        assert_eq!(config.max_speed_level, 10);
    }

    #[test]
    fn window_larger_than_array_is_rejected() {
        let config = LifeConfig {
            array_size: 50,
            ..LifeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SizeRange { max: 100, .. })
        ));
    }

    #[test]
    fn zero_speed_level_is_rejected() {
        let config = LifeConfig {
            min_speed_level: 0,
            ..LifeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SpeedRange { .. })));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            LifeConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn board_size_snaps_to_step() {
        let config = LifeConfig::default();
        assert_eq!(config.clamp_game_size(0), 5);
        assert_eq!(config.clamp_game_size(42), 40);
        assert_eq!(config.clamp_game_size(43), 45);
        assert_eq!(config.clamp_game_size(500), 100);
    }

    #[test]
    fn inverted_size_range_clamps_without_panicking() {
        let config = LifeConfig {
            min_game_size: 60,
            max_game_size: 10,
            ..LifeConfig::default()
        };
        assert_eq!(config.clamp_game_size(0), 10);
        assert_eq!(config.clamp_game_size(33), 35);
        assert_eq!(config.clamp_game_size(500), 60);
    }
}
