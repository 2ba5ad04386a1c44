//! Maze generation settings
//!
//! Settings can be built in code or read from a small `key = value` file:
//!
//! ```text
//! # denser maze with more loops
//! seed_prob = 0.6
//! connect_prob = 0.35
//! door_open_prob = 0.5
//! origin = 21,11
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::grid::Coord;

pub const DEFAULT_SEED_PROB: f64 = 0.4;
pub const DEFAULT_CONNECT_PROB: f64 = 0.2;
pub const DEFAULT_PILLAR_PROB: f64 = 0.0;
pub const DEFAULT_FREEWALL_PROB: f64 = 0.0;
pub const DEFAULT_DOOR_PROB: f64 = 1.0;
pub const DEFAULT_DOOR_OPEN_PROB: f64 = 0.3;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Maze generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Width of the carved area; `None` uses the whole zone
    pub width: Option<usize>,
    /// Height of the carved area; `None` uses the whole zone
    pub height: Option<usize>,
    /// First room of the growth front; `None` picks the room nearest the
    /// middle of the carved area
    pub origin: Option<Coord>,
    /// Chance a front cell stays on the front after acting (branching)
    pub seed_prob: f64,
    /// Chance an already-carved room is joined again (loops)
    pub connect_prob: f64,
    /// Chance an isolated pillar survives cleanup
    pub pillar_prob: f64,
    /// Chance a free-standing wall stub survives cleanup
    pub freewall_prob: f64,
    /// Chance a corridor junction becomes a door
    pub door_prob: f64,
    /// Chance a door starts open
    pub door_open_prob: f64,
    /// Growth loop step limit
    pub max_iterations: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            origin: None,
            seed_prob: DEFAULT_SEED_PROB,
            connect_prob: DEFAULT_CONNECT_PROB,
            pillar_prob: DEFAULT_PILLAR_PROB,
            freewall_prob: DEFAULT_FREEWALL_PROB,
            door_prob: DEFAULT_DOOR_PROB,
            door_open_prob: DEFAULT_DOOR_OPEN_PROB,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

fn clamp_prob(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default
    }
}

impl MazeConfig {
    /// Copy with every probability forced into `[0, 1]`
    ///
    /// Non-finite probabilities fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        Self {
            seed_prob: clamp_prob(self.seed_prob, DEFAULT_SEED_PROB),
            connect_prob: clamp_prob(self.connect_prob, DEFAULT_CONNECT_PROB),
            pillar_prob: clamp_prob(self.pillar_prob, DEFAULT_PILLAR_PROB),
            freewall_prob: clamp_prob(self.freewall_prob, DEFAULT_FREEWALL_PROB),
            door_prob: clamp_prob(self.door_prob, DEFAULT_DOOR_PROB),
            door_open_prob: clamp_prob(self.door_open_prob, DEFAULT_DOOR_OPEN_PROB),
            ..self.clone()
        }
    }

    /// Carved area for a zone of `width x height`, never larger than the zone
    pub fn target_size(&self, width: usize, height: usize) -> (usize, usize) {
        (
            self.width.map_or(width, |w| w.min(width)),
            self.height.map_or(height, |h| h.min(height)),
        )
    }

    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading maze config");
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse settings from `key = value` lines
    ///
    /// Blank lines and lines starting with `#` are skipped. Keys not present
    /// keep their defaults.
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => config.set_option(key.trim(), value.trim())?,
                None => return Err(ConfigError::MissingValue(line.to_string())),
            }
        }

        Ok(config)
    }

    /// Set one option by name
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::MissingValue(name.to_string()));
        }

        match name {
            "width" => self.width = Some(parse_value(name, value)?),
            "height" => self.height = Some(parse_value(name, value)?),
            "origin" => self.origin = Some(parse_coord(name, value)?),
            "seed_prob" => self.seed_prob = parse_value(name, value)?,
            "connect_prob" => self.connect_prob = parse_value(name, value)?,
            "pillar_prob" => self.pillar_prob = parse_value(name, value)?,
            "freewall_prob" => self.freewall_prob = parse_value(name, value)?,
            "door_prob" => self.door_prob = parse_value(name, value)?,
            "door_open_prob" => self.door_open_prob = parse_value(name, value)?,
            "max_iterations" => self.max_iterations = parse_value(name, value)?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(option, value))
}

fn parse_coord(option: &str, value: &str) -> Result<Coord, ConfigError> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| invalid(option, value))?;
    Ok(Coord::new(
        x.trim().parse().map_err(|_| invalid(option, value))?,
        y.trim().parse().map_err(|_| invalid(option, value))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.seed_prob, 0.4);
        assert_eq!(config.connect_prob, 0.2);
        assert_eq!(config.pillar_prob, 0.0);
        assert_eq!(config.freewall_prob, 0.0);
        assert_eq!(config.door_prob, 1.0);
        assert_eq!(config.door_open_prob, 0.3);
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.origin, None);
    }

    #[test]
    fn test_parse_config() {
        let config = MazeConfig::parse_config(
            "# comment\n\nseed_prob = 0.6\ndoor_open_prob=0\norigin = 5, 7\nwidth = 31\n",
        )
        .unwrap();
        assert_eq!(config.seed_prob, 0.6);
        assert_eq!(config.door_open_prob, 0.0);
        assert_eq!(config.origin, Some(Coord::new(5, 7)));
        assert_eq!(config.width, Some(31));
        assert_eq!(config.connect_prob, DEFAULT_CONNECT_PROB);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            MazeConfig::parse_config("colour = red"),
            Err(ConfigError::UnknownOption("colour".to_string()))
        );
        assert_eq!(
            MazeConfig::parse_config("seed_prob = lots"),
            Err(ConfigError::InvalidValue {
                option: "seed_prob".to_string(),
                value: "lots".to_string()
            })
        );
        assert_eq!(
            MazeConfig::parse_config("door_prob ="),
            Err(ConfigError::MissingValue("door_prob".to_string()))
        );
        assert!(matches!(
            MazeConfig::parse_config("origin = 3"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = MazeConfig {
            seed_prob: 3.0,
            connect_prob: -1.0,
            door_prob: f64::NAN,
            ..MazeConfig::default()
        }
        .sanitized();
        assert_eq!(config.seed_prob, 1.0);
        assert_eq!(config.connect_prob, 0.0);
        assert_eq!(config.door_prob, DEFAULT_DOOR_PROB);
    }

    #[test]
    fn test_target_size_clamped_to_zone() {
        let config = MazeConfig {
            width: Some(500),
            height: Some(11),
            ..MazeConfig::default()
        };
        assert_eq!(config.target_size(41, 21), (41, 11));
        assert_eq!(MazeConfig::default().target_size(41, 21), (41, 21));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MazeConfig::load_from_file(Path::new("/nonexistent/zone.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
