pub mod schema;

pub use schema::DataSchema;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::common::is_empty_doc;
use crate::utils::error::{ChurnError, Result};
use crate::utils::logger::{LogFormat, LogSettings};
use crate::utils::validation::{
    validate_log_level, validate_non_empty_string, validate_path, validate_range, Validate,
};

/// Top-level application config, one section per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "churn-pipeline".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub raw_path: PathBuf,
    pub processed_dir: PathBuf,
    pub schema_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("data/raw/churn.csv"),
            processed_dir: PathBuf::from("data/processed"),
            schema_path: PathBuf::from("schemas/churn_schema.yaml"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts/models"),
            file_name: "model.bin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: PathBuf,
    pub console: bool,
    pub format: LogFormat,
    pub max_size_mb: u64,
    pub backup_count: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            console: true,
            format: LogFormat::Text,
            max_size_mb: 10,
            backup_count: 5,
        }
    }
}

impl AppConfig {
    /// 從 YAML 檔案載入設定
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ChurnError::ConfigError {
            message: format!("Cannot read config file {}: {}", path.display(), e),
        })?;
        let processed = substitute_env_vars(&raw);

        let value: serde_yaml::Value = serde_yaml::from_str(&processed)?;
        if is_empty_doc(&value) {
            return Err(ChurnError::EmptyFileError {
                path: path.to_path_buf(),
            });
        }

        let config: AppConfig = serde_yaml::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or fall back to `config/config.yaml`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_file(default_config_path()),
        }
    }

    /// Where the trained model binary lives.
    pub fn model_path(&self) -> PathBuf {
        self.model.dir.join(&self.model.file_name)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.logging.level.clone(),
            dir: self.logging.dir.clone(),
            console: self.logging.console,
            format: self.logging.format,
            max_size_mb: self.logging.max_size_mb,
            backup_count: self.logging.backup_count,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("project.name", &self.project.name)?;
        validate_non_empty_string("model.file_name", &self.model.file_name)?;
        validate_path("data.raw_path", &self.data.raw_path.to_string_lossy())?;
        validate_path("data.processed_dir", &self.data.processed_dir.to_string_lossy())?;
        validate_path("data.schema_path", &self.data.schema_path.to_string_lossy())?;
        validate_path("model.dir", &self.model.dir.to_string_lossy())?;
        validate_log_level("logging.level", &self.logging.level)?;
        validate_range("logging.max_size_mb", self.logging.max_size_mb, 0, 10_240)?;
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("config/config.yaml")
}

/// 替換環境變數 (例如 ${MODEL_DIR})
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}
