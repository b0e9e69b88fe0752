//! One-shot project skeleton generator.
//!
//! Deliberately self-contained: plain `std::fs`, no reuse of the I/O
//! helpers, so it can be lifted into a fresh repository as-is.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::utils::error::Result;

/// What [`create_project_structure`] did, path by path.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.skipped.len()
    }
}

/// The paths the generator lays down, relative to the project root.
pub fn skeleton(project: &str) -> Vec<PathBuf> {
    entries(project).into_iter().map(|(path, _)| path).collect()
}

/// Create the skeleton under `root`.
///
/// Parent directories are created as needed. A file is written when it is
/// absent or empty; existing non-empty files are never touched, so the
/// generator is safe to run on a half-populated project.
pub fn create_project_structure(root: impl AsRef<Path>, project: &str) -> Result<ScaffoldReport> {
    let root = root.as_ref();
    let mut report = ScaffoldReport::default();

    for (relative, seed) in entries(project) {
        let path = root.join(&relative);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!("Creating directory: {}", parent.display());
            }
        }

        let absent_or_empty = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if absent_or_empty {
            fs::write(&path, seed)?;
            info!("Creating file: {}", path.display());
            report.created.push(path);
        } else {
            info!("File already exists, skipping: {}", path.display());
            report.skipped.push(path);
        }
    }

    Ok(report)
}

fn entries(project: &str) -> Vec<(PathBuf, String)> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let stub = |path: &str, title: &str| {
        (
            PathBuf::from(path),
            format!("//! {} for {}, created {}.\n", title, project, date),
        )
    };
    let empty = |path: String| (PathBuf::from(path), String::new());

    vec![
        (PathBuf::from("Dockerfile"), dockerfile(project)),
        empty(".dockerignore".to_string()),
        empty(".gitignore".to_string()),
        (PathBuf::from("Cargo.toml"), manifest(project)),
        empty("config/config.yaml".to_string()),
        empty("config/params.yaml".to_string()),
        empty("schemas/churn_schema.yaml".to_string()),
        empty("data/raw/.gitkeep".to_string()),
        empty("data/processed/.gitkeep".to_string()),
        empty("artifacts/models/.gitkeep".to_string()),
        empty("logs/.gitkeep".to_string()),
        stub(
            "src/components/data_ingestion.rs",
            "Data ingestion component",
        ),
        stub(
            "src/components/data_transformation.rs",
            "Data transformation component",
        ),
        stub("src/components/model_trainer.rs", "Model trainer component"),
        stub(
            "src/components/model_evaluation.rs",
            "Model evaluation component",
        ),
        stub("src/pipeline/training.rs", "Training pipeline stage"),
        stub("src/pipeline/prediction.rs", "Prediction pipeline stage"),
        empty(format!("notebooks/{}_eda.ipynb", date)),
        empty(format!("notebooks/{}_trials.ipynb", date)),
        stub("tests/schema_validation.rs", "Schema validation tests"),
        empty("infra/terraform/main.tf".to_string()),
        empty("docs/api_spec.yaml".to_string()),
    ]
}

fn dockerfile(project: &str) -> String {
    format!(
        "FROM rust:1.79 AS build\n\
         WORKDIR /app\n\
         COPY . .\n\
         RUN cargo build --release\n\
         \n\
         FROM debian:bookworm-slim\n\
         COPY --from=build /app/target/release/{project} /usr/local/bin/{project}\n\
         ENTRYPOINT [\"{project}\"]\n"
    )
}

fn manifest(project: &str) -> String {
    format!(
        "[package]\n\
         name = \"{project}\"\n\
         version = \"0.1.0\"\n\
         edition = \"2021\"\n\
         \n\
         [dependencies]\n"
    )
}
