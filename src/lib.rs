pub mod config;
pub mod domain;
pub mod pipeline;
pub mod scaffold;
pub mod utils;

pub use config::{AppConfig, DataSchema};
pub use domain::model::{ColumnType, Frame, ModelMetadata};
pub use utils::error::{ChurnError, Result};
