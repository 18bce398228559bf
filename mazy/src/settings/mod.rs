use std::{fs, path::PathBuf, str::FromStr};

use cmazy::runner::Strategy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{constants::base_path, error::AppError};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.toml");

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub toroidal: Option<bool>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub runners: Option<Vec<Strategy>>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn default_path() -> PathBuf {
        base_path().join("settings.toml")
    }

    /// Reads settings from `path`. A missing file is created with the commented defaults.
    pub fn load(path: PathBuf) -> Result<Self, AppError> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no settings at {path:?}, writing defaults");
                Self::reset_config(path)?;
                DEFAULT_SETTINGS.to_owned()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: PathBuf) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn reset_config(path: PathBuf) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Option<LevelFilter>, AppError> {
        self.log_level
            .as_deref()
            .map(|level| {
                LevelFilter::from_str(level).map_err(|_| AppError::InvalidLogLevel(level.into()))
            })
            .transpose()
    }
}
