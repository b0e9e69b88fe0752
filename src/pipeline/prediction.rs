use tracing::info;

use crate::config::AppConfig;
use crate::utils::common;
use crate::utils::error::{ChurnError, Result};

/// Batch prediction entry point.
///
/// Mirrors [`crate::pipeline::training::run`]: directories first, then the
/// prediction components once they exist.
pub fn run(config: &AppConfig) -> Result<()> {
    info!(
        "🚀 Prediction pipeline starting for '{}', model at {}",
        config.project.name,
        config.model_path().display()
    );
    common::create_directories(&[config.data.processed_dir.as_path()])?;

    Err(ChurnError::MissingComponentError {
        component: "prediction".to_string(),
    })
}
