/// TOML configuration for the driver, with defaults for every key.
/// No config file is required to run: defaults give a 2 s Simple Stroke over
/// 1000 units.

use serde::Deserialize;

use crate::motion::{PatternConfig, SpeedLimits};

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name of the pattern, e.g. "Stop'n'Go"
    pub pattern: String,
    /// Optional custom label for logs
    pub name: Option<String>,
    pub stroke: i32,
    pub depth: i32,
    /// Seconds for one full in-and-out cycle
    pub cycle_time_s: f32,
    pub sensation: f32,
    /// How often a paused pattern is re-polled
    pub poll_interval_ms: u64,
    /// Half strokes to run before exiting (0 = forever)
    pub strokes: u32,
    pub limits: LimitsConfig,
}

/// Machine limits, informational only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_speed: u32,
    pub max_acceleration: u32,
    pub steps_per_unit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: "Simple Stroke".into(),
            name: None,
            stroke: 1000,
            depth: 1000,
            cycle_time_s: 2.0,
            sensation: 0.0,
            poll_interval_ms: 10,
            strokes: 0,
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_speed: 0,        // unknown
            max_acceleration: 0, // unknown
            steps_per_unit: 0,
        }
    }
}

impl Config {
    /// Load config from `path`, or return defaults if missing or unparsable.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {path}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found at {path}. Using defaults.");
                Self::default()
            }
        }
    }

    /// The pattern-facing part of the configuration.
    pub fn pattern_config(&self) -> PatternConfig {
        PatternConfig {
            stroke: self.stroke,
            depth: self.depth,
            cycle_time: self.cycle_time_s,
            sensation: self.sensation,
            limits: SpeedLimits {
                max_speed: self.limits.max_speed,
                max_acceleration: self.limits.max_acceleration,
                steps_per_unit: self.limits.steps_per_unit,
            },
        }
    }
}

/// Config path: first CLI argument, then `$STROKE_ENGINE_CONFIG`, then
/// `stroke-engine.toml` in the working directory.
pub fn config_file_path(arg: Option<String>) -> String {
    if let Some(path) = arg {
        path
    } else if let Ok(path) = std::env::var("STROKE_ENGINE_CONFIG") {
        path
    } else {
        "stroke-engine.toml".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.pattern, "Simple Stroke");
        assert_eq!(config.poll_interval_ms, 10);
        assert!(config.pattern_config().validate().is_ok());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            pattern = "Stop'n'Go"
            sensation = -40.5

            [limits]
            max_speed = 6000
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pattern, "Stop'n'Go");
        assert_eq!(config.sensation, -40.5);
        assert_eq!(config.limits.max_speed, 6000);
        // Other fields should be defaults
        assert_eq!(config.limits.max_acceleration, 0);
        assert_eq!(config.stroke, 1000);
        assert!(config.name.is_none());
    }

    #[test]
    fn pattern_config_carries_everything() {
        let toml_str = r#"
            stroke = 800
            depth = 1200
            cycle_time_s = 0.75
            sensation = 12.0
            name = "warmup"

            [limits]
            max_speed = 6000
            max_acceleration = 60000
            steps_per_unit = 50
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let pc = config.pattern_config();
        assert_eq!(pc.stroke, 800);
        assert_eq!(pc.depth, 1200);
        assert_eq!(pc.cycle_time, 0.75);
        assert_eq!(pc.sensation, 12.0);
        assert_eq!(pc.limits.steps_per_unit, 50);
        assert_eq!(config.name.as_deref(), Some("warmup"));
    }

    #[test]
    fn explicit_path_wins() {
        assert_eq!(config_file_path(Some("x.toml".into())), "x.toml");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load("/nonexistent/stroke-engine.toml");
        assert_eq!(config.depth, 1000);
    }
}
