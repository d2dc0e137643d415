//! Application settings stored as TOML in the user's config directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::DEFAULT_TIMER_NAME;

const APP_DIR: &str = "media-timers";
const FILENAME: &str = "media-timers.toml";
const BASE_DIR_ENV: &str = "MEDIA_TIMERS_BASE_DIR";

const MIN_WIDTH: u16 = 320;
const MIN_HEIGHT: u16 = 200;
const MAX_DIMENSION: u16 = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Folder the resource dialog opens in first (home dir when unset)
    pub base_directory: Option<PathBuf>,

    /// Name given to timers created with "Add"
    pub default_timer_name: String,

    pub window_width: u16,
    pub window_height: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_directory: None,
            default_timer_name: DEFAULT_TIMER_NAME.to_string(),
            window_width: 720,
            window_height: 420,
        }
    }
}

/// How the config was obtained, reported once logging is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Loaded(PathBuf),
    Generated(PathBuf),
    /// Defaults in use, the generated file could not be written
    Unsaved(PathBuf, String),
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load the config, writing a default file when none exists
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource)> {
        let (mut config, source) = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = Self::parse(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            (config, ConfigSource::Loaded(path.to_path_buf()))
        } else {
            let config = Self::default();
            let source = match config.save_to(path) {
                Ok(()) => ConfigSource::Generated(path.to_path_buf()),
                Err(e) => ConfigSource::Unsaved(path.to_path_buf(), format!("{e:#}")),
            };
            (config, source)
        };

        config.apply_env_overrides();
        config.validate_and_clamp();
        Ok((config, source))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_base_dir_override(env::var_os(BASE_DIR_ENV).map(PathBuf::from));
    }

    fn apply_base_dir_override(&mut self, base_dir: Option<PathBuf>) {
        if let Some(base_dir) = base_dir.filter(|p| !p.as_os_str().is_empty()) {
            self.base_directory = Some(base_dir);
        }
    }

    /// Clamp values to usable ranges
    fn validate_and_clamp(&mut self) {
        if self.default_timer_name.trim().is_empty() {
            warn!(using = DEFAULT_TIMER_NAME, "default_timer_name is blank, using default");
            self.default_timer_name = DEFAULT_TIMER_NAME.to_string();
        }

        let width = self.window_width.clamp(MIN_WIDTH, MAX_DIMENSION);
        if width != self.window_width {
            warn!(window_width = self.window_width, using = width, "window_width out of range, clamping");
            self.window_width = width;
        }

        let height = self.window_height.clamp(MIN_HEIGHT, MAX_DIMENSION);
        if height != self.window_height {
            warn!(window_height = self.window_height, using = height, "window_height out of range, clamping");
            self.window_height = height;
        }
    }

    /// Starting folder for resource browsing
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
