//! Configuration loading for Arabesque.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::Sweep;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ArabesqueConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub readme: ReadmeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

impl OutputConfig {
    pub fn root(&self) -> &Path {
        Path::new(&self.directory)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root().join("images")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }
}

fn default_directory() -> String {
    "output".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_start")]
    pub start: f64,

    #[serde(default = "default_stop")]
    pub stop: f64,

    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            stop: default_stop(),
            step: default_step(),
        }
    }
}

impl SweepConfig {
    pub fn sweep(&self) -> Sweep {
        Sweep {
            start: self.start,
            stop: self.stop,
            step: self.step,
        }
    }
}

fn default_start() -> f64 {
    -5.0
}

fn default_stop() -> f64 {
    3.0
}

fn default_step() -> f64 {
    0.01
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_depth")]
    pub depth: u32,

    #[serde(default = "default_alpha")]
    pub alpha: f64,

    #[serde(default = "default_spot_size")]
    pub spot_size: f64,

    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            depth: default_depth(),
            alpha: default_alpha(),
            spot_size: default_spot_size(),
            background: default_background(),
        }
    }
}

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    512
}

fn default_depth() -> u32 {
    5
}

fn default_alpha() -> f64 {
    0.6
}

fn default_spot_size() -> f64 {
    0.5
}

fn default_background() -> String {
    "black".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeConfig {
    #[serde(default = "default_readme_path")]
    pub path: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            path: default_readme_path(),
        }
    }
}

fn default_readme_path() -> String {
    "README.md".to_string()
}

impl ArabesqueConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ARABESQUE").separator("_"))
            .build()?;

        let arabesque_config: ArabesqueConfig = config.try_deserialize()?;
        Ok(arabesque_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let config = ArabesqueConfig::load(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(config.output.directory, default_directory());
        assert_eq!(config.render.width, default_width());
        assert_eq!(config.render.background, default_background());
    }

    #[test]
    fn mistyped_values_fail_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("arabesque.toml");
        std::fs::write(&path, "[render]\nwidth = \"wide\"\n").expect("write config");

        assert!(ArabesqueConfig::load(&path).is_err());
    }
}
