use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use config::{Config, Environment, File, FileFormat, Source};
use serde::{Deserialize, Serialize};

use crate::surface::RegionBindings;

pub const DEFAULT_ATTENDANCE_GOAL: u32 = 50;
pub const DEFAULT_STORAGE_KEY: &str = "intelSummitCheckIn_v1";
pub const DEFAULT_GREETING_HIDE_MS: u64 = 2_500;
pub const DEFAULT_CONFIG_FILE: &str = "checkin.toml";
pub const ENV_PREFIX: &str = "CHECKIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub attendance_goal: u32,
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub greeting_hide_ms: u64,
    pub regions: RegionBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attendance_goal: DEFAULT_ATTENDANCE_GOAL,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
            greeting_hide_ms: DEFAULT_GREETING_HIDE_MS,
            regions: RegionBindings::default(),
        }
    }
}

impl Settings {
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_hide_ms)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.attendance_goal == 0 {
            bail!("attendance_goal must be greater than zero");
        }
        if self.storage_key.trim().is_empty() {
            bail!("storage_key must not be empty");
        }
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialize settings as TOML")
    }
}

/// Layers built-in defaults, a TOML file and `CHECKIN__*` environment variables.
///
/// Without an explicit path, `checkin.toml` in the working directory is read
/// when present. An explicit path must exist.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let file = match config_path {
        Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
        None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
    };
    layered_settings(file, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn layered_settings(
    file: impl Source + Send + Sync + 'static,
    env: Environment,
) -> anyhow::Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("failed to read check-in settings")?
        .try_deserialize()
        .context("invalid check-in settings")?;

    settings.validate()?;
    Ok(settings)
}
