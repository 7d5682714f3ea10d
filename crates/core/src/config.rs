//! Session configuration: board size, starting gravity and RNG seed.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TETRIS2048_HEIGHT` | `grid_height` | 20 |
//! | `TETRIS2048_WIDTH` | `grid_width` | 16 |
//! | `TETRIS2048_FALL_DELAY_MS` | `initial_fall_delay_ms` | 300 |
//! | `TETRIS2048_SEED` | `seed` | 1 |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, INITIAL_FALL_DELAY_MS, MIN_GRID_SIDE};

/// Settings for a new session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_height: usize,
    pub grid_width: usize,
    pub initial_fall_delay_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_height: DEFAULT_GRID_HEIGHT,
            grid_width: DEFAULT_GRID_WIDTH,
            initial_fall_delay_ms: INITIAL_FALL_DELAY_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            grid_height: parse_var(&lookup, "TETRIS2048_HEIGHT", defaults.grid_height)?,
            grid_width: parse_var(&lookup, "TETRIS2048_WIDTH", defaults.grid_width)?,
            initial_fall_delay_ms: parse_var(
                &lookup,
                "TETRIS2048_FALL_DELAY_MS",
                defaults.initial_fall_delay_ms,
            )?,
            seed: parse_var(&lookup, "TETRIS2048_SEED", defaults.seed)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Every piece must fit the board in every orientation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_height < MIN_GRID_SIDE || self.grid_width < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                height: self.grid_height,
                width: self.grid_width,
                min: MIN_GRID_SIDE,
            });
        }
        if self.initial_fall_delay_ms == 0 {
            return Err(ConfigError::ZeroFallDelay);
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GameConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.initial_fall_delay_ms, 300);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("TETRIS2048_HEIGHT", "12"),
            ("TETRIS2048_WIDTH", " 8 "),
            ("TETRIS2048_SEED", "77"),
        ]))
        .unwrap();
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.seed, 77);
        assert_eq!(config.initial_fall_delay_ms, 300);
    }

    #[test]
    fn test_invalid_number() {
        let err = GameConfig::from_lookup(lookup_from(&[("TETRIS2048_WIDTH", "wide")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "TETRIS2048_WIDTH",
                value: "wide".to_string(),
            }
        );
    }

    #[test]
    fn test_too_small() {
        let err = GameConfig::from_lookup(lookup_from(&[("TETRIS2048_HEIGHT", "3")])).unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { height: 3, .. }));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_width": 10}"#).unwrap();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 20);
    }
}
