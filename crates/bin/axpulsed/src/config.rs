//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `axpulse.toml` in the working directory (or the path in
//! `AXPULSE_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use axpulse_app::ports::ForegroundPresentation;
use axpulse_app::services::automation_service::ServiceOptions;
use axpulse_domain::error::ValidationError;
use axpulse_domain::gesture::GestureThresholds;
use axpulse_domain::throttle::ThrottleConfig;

const DEFAULT_PATH: &str = "axpulse.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pulse pacing and throttle countdowns.
    pub engine: EngineConfig,
    /// Persistent notice shown while running.
    pub foreground: ForegroundPresentation,
    /// Gesture distance thresholds.
    pub gestures: GestureThresholds,
    /// Virtual host settings.
    pub host: HostConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Engine pacing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Milliseconds between pulses.
    pub tick_interval_ms: u64,
    /// Stop after this many pulses; run until Ctrl-C when absent.
    pub max_ticks: Option<u64>,
    /// Per-action initial countdowns and the shared reset value.
    pub throttle: ThrottleConfig,
}

/// Virtual host configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// JSON scene to load; the built-in demo screen when absent.
    pub scene: Option<PathBuf>,
    /// JSON Lines hand track. When set, each pulse replays one frame through
    /// the gesture classifier instead of ticking every action.
    pub landmarks: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("AXPULSE_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AXPULSE_TICK_MS") {
            if let Ok(ms) = val.parse() {
                self.engine.tick_interval_ms = ms;
            }
        }
        if let Some(val) = var("AXPULSE_MAX_TICKS") {
            if let Ok(max) = val.parse() {
                self.engine.max_ticks = Some(max);
            }
        }
        if let Some(val) = var("AXPULSE_SCENE") {
            self.host.scene = Some(PathBuf::from(val));
        }
        if let Some(val) = var("AXPULSE_LANDMARKS") {
            self.host.landmarks = Some(PathBuf::from(val));
        }
        if let Some(val) = var("AXPULSE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.tick_interval_ms == 0 {
            return Err(ValidationError::ZeroInterval.into());
        }
        self.foreground.validate()?;
        self.gestures.validate()?;
        Ok(())
    }

    /// Interval between pulses.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.engine.tick_interval_ms)
    }

    /// Settings handed to the automation service on attach.
    #[must_use]
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            throttles: self.engine.throttle.clone(),
            presentation: self.foreground.clone(),
            gestures: self.gestures,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            max_ticks: None,
            throttle: ThrottleConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "axpulsed=info,axpulse_app=info,axpulse_adapter_virtual=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.tick_interval_ms, 200);
        assert!(config.engine.max_ticks.is_none());
        assert_eq!(config.engine.throttle, ThrottleConfig::default());
        assert_eq!(config.foreground.title, "Gesture Service");
        assert!(config.host.scene.is_none());
        assert!(config.host.landmarks.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.tick_interval_ms, 200);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [engine]
            tick_interval_ms = 50
            max_ticks = 1000

            [engine.throttle]
            scroll_forward = 10
            scroll_backward = 20
            tap = 30
            reset = 2

            [foreground]
            title = 'Scrolling'
            message = 'Hands-free scrolling is on'

            [gestures]
            pinch = 0.04
            curl = 0.03

            [host]
            scene = 'scenes/feed.json'
            landmarks = 'tracks/swipe.jsonl'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.tick_interval_ms, 50);
        assert_eq!(config.engine.max_ticks, Some(1000));
        assert_eq!(
            config.engine.throttle,
            ThrottleConfig {
                scroll_forward: 10,
                scroll_backward: 20,
                tap: 30,
                reset: 2,
            }
        );
        assert_eq!(config.foreground.title, "Scrolling");
        assert!((config.gestures.pinch - 0.04).abs() < f64::EPSILON);
        assert_eq!(config.host.scene, Some(PathBuf::from("scenes/feed.json")));
        assert_eq!(config.host.landmarks, Some(PathBuf::from("tracks/swipe.jsonl")));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_throttle_with_defaults() {
        let toml = "
            [engine.throttle]
            tap = 3
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.throttle.tap, 3);
        assert_eq!(config.engine.throttle.scroll_forward, 60);
        assert_eq!(config.engine.throttle.reset, 5);
        assert_eq!(config.engine.tick_interval_ms, 200);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.engine.tick_interval_ms, 200);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("AXPULSE_TICK_MS", "75"),
            ("AXPULSE_MAX_TICKS", "9"),
            ("AXPULSE_SCENE", "/tmp/scene.json"),
            ("AXPULSE_LANDMARKS", "/tmp/hand.jsonl"),
            ("AXPULSE_LOG", "trace"),
        ]));
        assert_eq!(config.engine.tick_interval_ms, 75);
        assert_eq!(config.engine.max_ticks, Some(9));
        assert_eq!(config.host.scene, Some(PathBuf::from("/tmp/scene.json")));
        assert_eq!(config.host.landmarks, Some(PathBuf::from("/tmp/hand.jsonl")));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_axpulse_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("AXPULSE_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_ignore_unparseable_numeric_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("AXPULSE_TICK_MS", "fast")]));
        assert_eq!(config.engine.tick_interval_ms, 200);
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = Config::default();
        config.engine.tick_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ValidationError::ZeroInterval))
        ));
    }

    #[test]
    fn should_reject_empty_title() {
        let mut config = Config::default();
        config.foreground.title = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ValidationError::EmptyTitle))
        ));
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_build_service_options_from_config() {
        let mut config = Config::default();
        config.engine.throttle.tap = 7;
        let options = config.service_options();
        assert_eq!(options.throttles.tap, 7);
        assert_eq!(options.presentation, config.foreground);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
    }
}
