use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Binary serialization error: {0}")]
    BincodeError(#[from] bincode::Error),

    #[error("File is empty: {}", .path.display())]
    EmptyFileError { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Schema validation failed, missing columns: {}", .missing.join(", "))]
    SchemaValidationError { missing: Vec<String> },

    #[error("Ragged row: expected {expected} cells, got {actual}")]
    RaggedRowError { expected: usize, actual: usize },

    #[error("Pipeline component not implemented: {component}")]
    MissingComponentError { component: String },
}

pub type Result<T> = std::result::Result<T, ChurnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_missing_columns() {
        let err = ChurnError::SchemaValidationError {
            missing: vec!["churn".to_string(), "customer_id".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Schema validation failed, missing columns: churn, customer_id"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ChurnError = io.into();
        assert!(matches!(err, ChurnError::IoError(_)));
    }
}
