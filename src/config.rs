// Configuration for launch-dash
// Loaded from --config PATH or <config_dir>/launch-dash/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset used when no path is given on the command line.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET),
        }
    }
}

/// Scale of the payload range slider, in kg.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

/// Upper bound on slider positions and on tick marks drawn per frame.
const MAX_SLIDER_STEPS: f64 = 1_000.0;
const MAX_MARKS: usize = 20;

impl SliderConfig {
    /// Reject scales the slider cannot render: non-finite or inverted
    /// bounds, a non-positive step, or too many steps.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(format!(
                "slider needs finite min < max, got {}..{}",
                self.min, self.max
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(format!("slider step must be positive, got {}", self.step));
        }
        if (self.max - self.min) / self.step > MAX_SLIDER_STEPS {
            return Err(format!(
                "slider step {} is too small for {}..{}",
                self.step, self.min, self.max
            ));
        }
        Ok(())
    }

    /// Tick marks shown under the slider: every second step, at most
    /// `MAX_MARKS` of them.
    pub fn marks(&self) -> Vec<f64> {
        if self.validate().is_err() {
            return vec![self.min];
        }
        let stride = self.step * 2.0;
        let n = (((self.max - self.min) / stride).floor() as usize).min(MAX_MARKS - 1);
        (0..=n).map(|i| self.min + i as f64 * stride).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub slider: SliderConfig,
    pub window: WindowConfig,
}

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Load configuration from `explicit` or the default location.
/// Returns defaults if the file doesn't exist, plus a warning on read or
/// parse errors.
pub fn load_config(explicit: Option<&Path>) -> ConfigResult {
    let Some(config_path) = explicit.map(Path::to_path_buf).or_else(default_config_path) else {
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    };

    log::debug!("Loading config from {:?}", config_path);

    // A missing default file is normal; a missing explicit file is not.
    if !config_path.exists() {
        return ConfigResult {
            config: Config::default(),
            warning: explicit.map(|p| format!("Config file {} not found", p.display())),
        };
    }

    let contents = match fs::read_to_string(&config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    parse_config(&contents)
}

/// Parse TOML text, falling back to defaults with a warning.
pub fn parse_config(contents: &str) -> ConfigResult {
    match toml::from_str::<Config>(contents) {
        Ok(mut config) => {
            let mut warning = None;
            if let Err(e) = config.slider.validate() {
                log::warn!("Ignoring [slider] section: {e}");
                config.slider = SliderConfig::default();
                warning = Some(format!("Invalid config: {e}"));
            }
            ConfigResult { config, warning }
        }
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!("Invalid config: {}", e)),
        },
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("launch-dash").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.slider.min, 0.0);
        assert_eq!(config.slider.max, 10_000.0);
        assert_eq!(config.slider.step, 1_000.0);
    }

    #[test]
    fn test_parse_partial_config_keeps_other_defaults() {
        let toml = r#"
[slider]
step = 500.0
"#;
        let result = parse_config(toml);
        assert!(result.warning.is_none());
        assert_eq!(result.config.slider.step, 500.0);
        assert_eq!(result.config.slider.max, 10_000.0);
        assert_eq!(result.config.window, WindowConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[data]
path = "launches.parquet"

[window]
width = 800.0
height = 600.0
"#;
        let config = parse_config(toml).config;
        assert_eq!(config.data.path, PathBuf::from("launches.parquet"));
        assert_eq!(config.window.width, 800.0);
    }

    #[test]
    fn test_malformed_toml_falls_back_with_warning() {
        let result = parse_config("[slider\nstep = 1");
        assert_eq!(result.config, Config::default());
        assert!(result.warning.unwrap().starts_with("Invalid config"));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"x.json\"").unwrap();
        let result = load_config(Some(file.path()));
        assert!(result.warning.is_none());
        assert_eq!(result.config.data.path, PathBuf::from("x.json"));
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let result = load_config(Some(Path::new("/no/such/launch-dash.toml")));
        assert_eq!(result.config, Config::default());
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_infinite_slider_max_falls_back_to_default() {
        let result = parse_config("[slider]\nmax = inf\n");
        assert_eq!(result.config.slider, SliderConfig::default());
        assert!(result.warning.unwrap().contains("finite"));
    }

    #[test]
    fn test_invalid_slider_scales_are_rejected() {
        for toml in [
            "[slider]\nmin = nan\n",
            "[slider]\nmin = 5000.0\nmax = 100.0\n",
            "[slider]\nstep = 0.0\n",
            "[slider]\nstep = -10.0\n",
            "[slider]\nstep = 0.001\n",
        ] {
            let result = parse_config(toml);
            assert_eq!(result.config.slider, SliderConfig::default(), "{toml}");
            assert!(result.warning.is_some(), "{toml}");
        }
    }

    #[test]
    fn test_invalid_slider_keeps_other_sections() {
        let result = parse_config("[slider]\nmax = inf\n\n[data]\npath = \"a.csv\"\n");
        assert_eq!(result.config.data.path, PathBuf::from("a.csv"));
    }

    #[test]
    fn test_marks_never_blow_up() {
        let unbounded = SliderConfig { min: 0.0, max: f64::INFINITY, step: 1_000.0 };
        assert_eq!(unbounded.marks(), vec![0.0]);

        let fine = SliderConfig { min: 0.0, max: 10_000.0, step: 10.0 };
        assert_eq!(fine.marks().len(), 20);
    }

    #[test]
    fn test_slider_marks_follow_original_scale() {
        let marks = SliderConfig::default().marks();
        assert_eq!(marks, vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0, 10_000.0]);
    }
}
