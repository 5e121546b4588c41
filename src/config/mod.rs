use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::reminder::{CadenceTable, DEFAULT_CADENCE};
use crate::errors::ConfigError;

const HOME_ENV: &str = "BILL_REMINDER_HOME";
const DEFAULT_DIR_NAME: &str = ".bill_reminder";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User-tunable engine settings: the reminder cadence table, the cadence given
/// to new payments, and terminal colouring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "EngineConfig::default_cadence_value")]
    pub default_cadence: String,
    #[serde(default)]
    pub cadences: CadenceTable,
    #[serde(default = "EngineConfig::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_cadence: Self::default_cadence_value(),
            cadences: CadenceTable::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl EngineConfig {
    pub fn default_cadence_value() -> String {
        DEFAULT_CADENCE.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// The default cadence must name an entry of the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cadences.contains(&self.default_cadence) {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "default cadence `{}` is not defined in the cadence table",
                self.default_cadence
            )))
        }
    }
}

/// Returns the application data directory, defaulting to `~/.bill_reminder`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Handles loading and saving [`EngineConfig`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `config.json` inside the application data directory.
    pub fn from_env() -> Self {
        Self::new(app_data_dir().join(CONFIG_FILE))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the stored configuration, or the defaults when none is saved yet.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file; using defaults");
            return Ok(EngineConfig::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: EngineConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        info!(path = %self.config_path.display(), "saved engine configuration");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
