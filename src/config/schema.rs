use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::model::ColumnType;
use crate::utils::common;
use crate::utils::error::Result;

/// Declared shape of the raw dataset.
///
/// Lives in its own YAML file (see `schemas/churn_schema.yaml`) so data
/// contracts can change without touching the application config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    pub required_columns: Vec<String>,
    #[serde(default)]
    pub dtypes: BTreeMap<String, ColumnType>,
}

impl DataSchema {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        common::read_yaml(path)
    }
}
