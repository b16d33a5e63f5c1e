// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences from a `settings.toml` file.
//!
//! Everything is optional; a missing or unreadable file falls back to
//! defaults (the user's home directory, `exiftool` on `PATH`, and the
//! standard thumbnail bounds).

use crate::error::Result;
use crate::exiftool;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "picdate";

/// Bounding box for thumbnails in the directory listing.
pub const DEFAULT_LISTING_BOUND: u32 = 200;
/// Bounding box for the preview in the picture detail view.
pub const DEFAULT_DETAIL_BOUND: u32 = 800;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory shown at startup.
    pub start_path: Option<String>,
    /// External metadata tool program.
    pub tool_program: Option<String>,
    #[serde(default)]
    pub listing_thumbnail: Option<u32>,
    #[serde(default)]
    pub detail_thumbnail: Option<u32>,
}

impl Config {
    /// The startup directory: configured path, else the home directory,
    /// else the filesystem root.
    pub fn start_dir(&self) -> PathBuf {
        self.start_path
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    pub fn tool_program(&self) -> String {
        self.tool_program
            .clone()
            .unwrap_or_else(|| exiftool::DEFAULT_PROGRAM.to_string())
    }

    pub fn listing_bound(&self) -> u32 {
        self.listing_thumbnail.unwrap_or(DEFAULT_LISTING_BOUND)
    }

    pub fn detail_bound(&self) -> u32 {
        self.detail_thumbnail.unwrap_or(DEFAULT_DETAIL_BOUND)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
