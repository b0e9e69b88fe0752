use tracing::info;

use crate::config::AppConfig;
use crate::utils::common;
use crate::utils::error::{ChurnError, Result};

/// End-to-end training entry point.
///
/// Prepares the working directories declared in the config, then hands off
/// to the training components. Until those land, reports which one is
/// missing instead of silently doing nothing.
pub fn run(config: &AppConfig) -> Result<()> {
    info!(
        "🚀 Training pipeline starting for '{}'",
        config.project.name
    );
    common::create_directories(&[
        config.data.processed_dir.as_path(),
        config.model.dir.as_path(),
    ])?;

    Err(ChurnError::MissingComponentError {
        component: "data_ingestion".to_string(),
    })
}
