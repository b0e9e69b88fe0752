use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{ChurnError, Result};

/// Column types a schema file can declare, named after the dtype strings
/// used in `schemas/*.yaml` (`int`, `float`, `bool`, `str`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Str,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Str => "str",
        };
        write!(f, "{}", name)
    }
}

/// In-memory tabular data: ordered headers plus rows of raw cells as read
/// from CSV. Cells stay strings; typing happens lazily via inference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 每列必須與表頭等寬
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ChurnError::RaggedRowError {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// (rows, columns), pandas-style
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a column, `None` if the column does not exist.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Infer the type of a column from its non-empty cells. Tries `int`,
    /// then `float`, then `bool`; anything else (or an all-empty column)
    /// is `str`.
    pub fn infer_column_type(&self, name: &str) -> Option<ColumnType> {
        let values = self.column_values(name)?;
        let cells: Vec<&str> = values
            .into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();

        if cells.is_empty() {
            return Some(ColumnType::Str);
        }

        if cells.iter().all(|v| v.parse::<i64>().is_ok()) {
            Some(ColumnType::Int)
        } else if cells.iter().all(|v| v.parse::<f64>().is_ok()) {
            Some(ColumnType::Float)
        } else if cells.iter().all(|v| is_bool_literal(v)) {
            Some(ColumnType::Bool)
        } else {
            Some(ColumnType::Str)
        }
    }
}

fn is_bool_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Sidecar metadata written next to a persisted model blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub algorithm: String,
    pub trained_at: DateTime<Utc>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl ModelMetadata {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            trained_at: Utc::now(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        let mut frame = Frame::new(vec![
            "customer_id".to_string(),
            "tenure_months".to_string(),
            "monthly_spend".to_string(),
            "is_active".to_string(),
            "churn".to_string(),
        ]);
        frame
            .push_row(vec![
                "C-1001".to_string(),
                "12".to_string(),
                "54.90".to_string(),
                "true".to_string(),
                "0".to_string(),
            ])
            .unwrap();
        frame
            .push_row(vec![
                "C-1002".to_string(),
                "3".to_string(),
                "12.00".to_string(),
                "false".to_string(),
                "1".to_string(),
            ])
            .unwrap();
        frame
    }

    #[test]
    fn test_shape_counts_rows_and_columns() {
        let frame = sample_frame();
        assert_eq!(frame.shape(), (2, 5));
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_push_row_rejects_ragged_rows() {
        let mut frame = Frame::new(vec!["a".to_string(), "b".to_string()]);
        let err = frame.push_row(vec!["only-one".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            ChurnError::RaggedRowError {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_infer_column_types() {
        let frame = sample_frame();
        assert_eq!(frame.infer_column_type("customer_id"), Some(ColumnType::Str));
        assert_eq!(frame.infer_column_type("tenure_months"), Some(ColumnType::Int));
        assert_eq!(
            frame.infer_column_type("monthly_spend"),
            Some(ColumnType::Float)
        );
        assert_eq!(frame.infer_column_type("is_active"), Some(ColumnType::Bool));
        // 0/1 columns read as int, like the churn label
        assert_eq!(frame.infer_column_type("churn"), Some(ColumnType::Int));
    }

    #[test]
    fn test_infer_ignores_empty_cells() {
        let mut frame = Frame::new(vec!["score".to_string()]);
        frame.push_row(vec!["".to_string()]).unwrap();
        frame.push_row(vec!["4.5".to_string()]).unwrap();
        assert_eq!(frame.infer_column_type("score"), Some(ColumnType::Float));
    }

    #[test]
    fn test_infer_all_empty_column_is_str() {
        let mut frame = Frame::new(vec!["notes".to_string()]);
        frame.push_row(vec!["".to_string()]).unwrap();
        assert_eq!(frame.infer_column_type("notes"), Some(ColumnType::Str));
    }

    #[test]
    fn test_infer_unknown_column_is_none() {
        let frame = sample_frame();
        assert_eq!(frame.infer_column_type("no_such_column"), None);
        assert_eq!(frame.column_values("no_such_column"), None);
    }

    #[test]
    fn test_column_type_display_matches_schema_names() {
        assert_eq!(ColumnType::Int.to_string(), "int");
        assert_eq!(ColumnType::Str.to_string(), "str");
    }

    #[test]
    fn test_metadata_builder() {
        let meta = ModelMetadata::new("xgboost").with_metric("auc", 0.91);
        assert_eq!(meta.algorithm, "xgboost");
        assert_eq!(meta.metrics.get("auc"), Some(&0.91));
    }
}
