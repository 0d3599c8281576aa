//! Session configuration.
//!
//! A configuration is read once at startup and never changes afterwards.
//! Two source formats are accepted: JSON (files ending in `.json`) and
//! `KEY=VALUE` properties (everything else). Both use the same key names.

use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use super::error::ConfigError;

const DEFAULT_SPECIAL_TILE_FREQUENCY: NonZeroU32 = NonZeroU32::new(4).unwrap();

/// Game parameters that stay fixed for a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    /// Edge length of one tile in pixels.
    pub tile_size: u32,
    /// Board width in pixels.
    pub board_width: u32,
    /// Board height in pixels.
    pub board_height: u32,
    /// Points awarded for every plain pickup.
    pub score_per_tile: u32,
    /// Every N-th pickup places a hazard or bonus tile instead of a plain one.
    pub special_tile_frequency: NonZeroU32,
    /// Milliseconds between two ticks.
    pub game_speed_ms: u64,
    /// Seed for the session's random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 25,
            board_width: 600,
            board_height: 600,
            score_per_tile: 5,
            special_tile_frequency: DEFAULT_SPECIAL_TILE_FREQUENCY,
            game_speed_ms: 500,
            seed: None,
        }
    }
}

impl Config {
    /// Reads a configuration file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_properties(&text)
        }
    }

    /// Like [`Config::load`], but any failure yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(%err, "falling back to default config");
                Self::default()
            }
        }
    }

    /// Parses a JSON object. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Parses `KEY=VALUE` lines. The separator may also be `:` or plain
    /// whitespace. Blank lines and lines starting with `#` or `!` are
    /// skipped; lines without a value and unknown keys are ignored with a
    /// log entry.
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let Some((key, value)) = split_property(line) else {
                let err = ConfigError::MalformedLine {
                    line: index + 1,
                    text: line.to_string(),
                };
                tracing::warn!(%err, "skipping config line");
                continue;
            };

            match key {
                "TILE_SIZE" => config.tile_size = parse_int(key, value)?,
                "BOARD_WIDTH" => config.board_width = parse_int(key, value)?,
                "BOARD_HEIGHT" => config.board_height = parse_int(key, value)?,
                "SCORE_PER_TILE" => config.score_per_tile = parse_int(key, value)?,
                "SPECIAL_TILE_FREQUENCY" => {
                    let n: u32 = parse_int(key, value)?;
                    config.special_tile_frequency =
                        NonZeroU32::new(n).ok_or(ConfigError::OutOfRange {
                            key: "SPECIAL_TILE_FREQUENCY",
                            value: 0,
                            min: 1,
                        })?;
                }
                "GAME_SPEED_MS" => config.game_speed_ms = parse_int(key, value)?,
                "SEED" => config.seed = Some(parse_int(key, value)?),
                _ => tracing::debug!(key, "ignoring unknown config key"),
            }
        }

        config.validate()
    }

    /// Board width in whole tiles.
    pub fn width_tiles(&self) -> i32 {
        let tiles = self.board_width.checked_div(self.tile_size).unwrap_or(0);
        i32::try_from(tiles).unwrap_or(i32::MAX)
    }

    /// Board height in whole tiles.
    pub fn height_tiles(&self) -> i32 {
        let tiles = self.board_height.checked_div(self.tile_size).unwrap_or(0);
        i32::try_from(tiles).unwrap_or(i32::MAX)
    }

    /// Time between two ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.game_speed_ms)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let at_least = |key: &'static str, value: u64, min: u64| {
            if value < min {
                Err(ConfigError::OutOfRange { key, value, min })
            } else {
                Ok(())
            }
        };

        at_least("TILE_SIZE", self.tile_size.into(), 1)?;
        // the board must hold at least one tile on each axis
        at_least("BOARD_WIDTH", self.board_width.into(), self.tile_size.into())?;
        at_least("BOARD_HEIGHT", self.board_height.into(), self.tile_size.into())?;
        at_least("GAME_SPEED_MS", self.game_speed_ms, 1)?;

        Ok(self)
    }
}

// The key ends at the first `=`, `:` or whitespace; one `=` or `:` may
// follow the whitespace.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let end = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace())?;
    let (key, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let value = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim();

    if key.is_empty() || value.is_empty() {
        None
    } else {
        Some((key, value))
    }
}

fn parse_int<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
