use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Rows = columns
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Window width and height in pixels
    #[serde(default = "default_window_size")]
    pub window_size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    /// Search steps rendered per frame; 0 runs the whole search in one frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive, overridden by RUST_LOG
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_dimension() -> usize { 38 }
fn default_window_size() -> f32 { 800.0 }
fn default_steps_per_frame() -> usize { 1 }
fn default_window_title() -> String { "A* Path Finding Algorithm".to_string() }
fn default_show_grid_lines() -> bool { true }
fn default_show_help() -> bool { true }
fn default_level() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            window_size: default_window_size(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: default_show_grid_lines(),
            show_help: default_show_help(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl GridConfig {
    /// Side length of one cell in pixels
    pub fn cell_size(&self) -> f32 {
        self.window_size / self.dimension as f32
    }
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        if config.grid.dimension == 0 {
            tracing::warn!("grid.dimension must be positive, using {}", default_dimension());
            config.grid.dimension = default_dimension();
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Read a config file without logging, falling back to defaults if it is
    /// missing or malformed. The report can be logged once logging is up.
    pub fn read(path: impl AsRef<Path>) -> (Self, LoadReport) {
        let path = path.as_ref();
        if !path.exists() {
            return (Config::default(), LoadReport::Missing);
        }
        match Self::from_file(path) {
            Ok(config) => (config, LoadReport::Loaded),
            Err(e) => (Config::default(), LoadReport::Invalid(e.to_string())),
        }
    }
}

/// How `Config::read` arrived at its config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    Loaded,
    Missing,
    Invalid(String),
}

impl LoadReport {
    pub fn log(&self, path: &str) {
        match self {
            LoadReport::Loaded => tracing::info!("loaded configuration from {}", path),
            LoadReport::Missing => {
                tracing::info!("no {} found, using default configuration", path)
            }
            LoadReport::Invalid(e) => {
                tracing::warn!("failed to load {}: {}; using default configuration", path, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.grid.dimension, 38);
        assert_eq!(config.animation.steps_per_frame, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            "[grid]\ndimension = 10\n\n[logging]\nenable_action_log = false\n",
        )
        .unwrap();
        assert_eq!(config.grid.dimension, 10);
        assert_eq!(config.grid.window_size, 800.0);
        assert!(!config.logging.enable_action_log);
        assert_eq!(config.logging.action_log_path, "action_log.json");
        assert_eq!(config.grid.cell_size(), 80.0);
    }

    #[test]
    fn zero_dimension_falls_back() {
        let config = Config::from_toml("[grid]\ndimension = 0\n").unwrap();
        assert_eq!(config.grid.dimension, 38);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("[grid\ndimension = ").is_err());
    }

    #[test]
    fn read_reports_how_config_was_obtained() {
        let dir = std::env::temp_dir().join(format!("astar-viz-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let (config, report) = Config::read(dir.join("absent.toml"));
        assert_eq!(report, LoadReport::Missing);
        assert_eq!(config.grid.dimension, 38);

        let good = dir.join("good.toml");
        std::fs::write(&good, "[grid]\ndimension = 12\n").unwrap();
        let (config, report) = Config::read(&good);
        assert_eq!(report, LoadReport::Loaded);
        assert_eq!(config.grid.dimension, 12);

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "[grid\n").unwrap();
        let (config, report) = Config::read(&bad);
        assert!(matches!(report, LoadReport::Invalid(_)));
        assert_eq!(config.grid.dimension, 38);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
