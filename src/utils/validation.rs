use tracing::{info, warn};

use crate::config::schema::DataSchema;
use crate::domain::model::Frame;
use crate::utils::error::{ChurnError, Result};

/// Anything that can sanity-check its own fields before the pipeline uses it.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Check a frame against the declared schema.
///
/// Missing required columns are an error that names every absent column.
/// A dtype mismatch only warns; downstream steps decide whether to coerce.
pub fn validate_frame(frame: &Frame, schema: &DataSchema) -> Result<()> {
    let mut missing: Vec<String> = schema
        .required_columns
        .iter()
        .filter(|name| frame.column_index(name).is_none())
        .cloned()
        .collect();

    if !missing.is_empty() {
        missing.sort();
        return Err(ChurnError::SchemaValidationError { missing });
    }

    for (name, expected) in &schema.dtypes {
        let Some(actual) = frame.infer_column_type(name) else {
            continue;
        };
        if actual != *expected {
            warn!(
                "Column '{}' expected dtype '{}', found '{}'",
                name, expected, actual
            );
        }
    }

    info!(
        "Data schema validation passed ({} required columns)",
        schema.required_columns.len()
    );
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ChurnError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ChurnError::InvalidConfigValueError {
            field: field.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ChurnError::InvalidConfigValueError {
            field: field.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ChurnError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_log_level(field: &str, value: &str) -> Result<()> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if LEVELS.contains(&value.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    Err(ChurnError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("expected one of: {}", LEVELS.join(", ")),
    })
}
