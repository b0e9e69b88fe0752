use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::model::{Frame, ModelMetadata};
use crate::utils::error::{ChurnError, Result};

/// Read a YAML file into any deserializable type.
///
/// A document with no content (comments only, `{}`, `[]`, `''`) is an
/// error, so a half-written config never silently becomes a default.
pub fn read_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let doc = read_yaml_value(path)?;
    let value = serde_yaml::from_value(doc)?;
    tracing::info!("YAML loaded: {}", path.display());
    Ok(value)
}

/// Read a YAML file as an untyped document, rejecting empty files.
pub fn read_yaml_value(path: impl AsRef<Path>) -> Result<serde_yaml::Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let doc: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if is_empty_doc(&doc) {
        return Err(ChurnError::EmptyFileError {
            path: path.to_path_buf(),
        });
    }
    Ok(doc)
}

/// Null, `{}`, `[]`, and `''` all count as "nothing in the file".
pub(crate) fn is_empty_doc(doc: &serde_yaml::Value) -> bool {
    match doc {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Mapping(mapping) => mapping.is_empty(),
        serde_yaml::Value::Sequence(sequence) => sequence.is_empty(),
        serde_yaml::Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Dot-notation lookup into a loaded YAML document, e.g.
/// `yaml_lookup(&doc, "logging.level")`. Convenience only.
pub fn yaml_lookup<'a>(doc: &'a serde_yaml::Value, dotted: &str) -> Option<&'a serde_yaml::Value> {
    let mut current = doc;
    for segment in dotted.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Save any serializable value as YAML.
pub fn save_yaml<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let text = serde_yaml::to_string(value)?;
    fs::write(path, text)?;
    tracing::info!("YAML saved: {}", path.display());
    Ok(())
}

/// Save any serializable value as pretty-printed JSON (4-space indent).
pub fn save_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');

    fs::write(path, &buf)?;
    tracing::info!(
        "JSON saved: {} (~{})",
        path.display(),
        format_size(buf.len() as u64)
    );
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    tracing::info!("JSON loaded: {}", path.display());
    Ok(value)
}

/// Save any serializable value as a binary blob (bincode).
pub fn save_bin<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let bytes = bincode::serialize(value)?;
    fs::write(path, &bytes)?;
    tracing::info!(
        "Binary saved: {} (~{})",
        path.display(),
        format_size(bytes.len() as u64)
    );
    Ok(())
}

pub fn load_bin<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let value = bincode::deserialize(&bytes)?;
    tracing::info!("Binary loaded: {}", path.display());
    Ok(value)
}

/// Load a CSV file into a `Frame` and log its shape.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Frame> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut frame = Frame::new(headers);

    for record in reader.records() {
        let record = record?;
        frame.push_row(record.iter().map(str::to_string).collect())?;
    }

    tracing::info!("CSV loaded: {} | shape: {:?}", path.display(), frame.shape());
    Ok(frame)
}

/// Write a `Frame` back out as CSV.
pub fn save_csv(frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(frame.columns())?;
    for row in frame.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    tracing::info!("CSV saved: {} | size: {}", path.display(), get_size(path)?);
    Ok(())
}

/// Create every directory in the list if it does not exist. Idempotent.
pub fn create_directories<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        tracing::info!("Created directory: {}", path.display());
    }
    Ok(())
}

/// Persist a model as a binary blob; when metadata is given, a
/// `<file>.metadata.json` sidecar lands next to it.
pub fn save_model<T: Serialize>(
    path: impl AsRef<Path>,
    model: &T,
    metadata: Option<&ModelMetadata>,
) -> Result<()> {
    let path = path.as_ref();
    save_bin(path, model)?;
    if let Some(metadata) = metadata {
        let sidecar = metadata_path(path);
        save_json(&sidecar, metadata)?;
        tracing::info!("Model metadata saved: {}", sidecar.display());
    }
    Ok(())
}

/// Load a model blob together with its sidecar metadata, if present.
pub fn load_model<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<(T, Option<ModelMetadata>)> {
    let path = path.as_ref();
    let model = load_bin(path)?;

    let sidecar = metadata_path(path);
    let metadata = if sidecar.exists() {
        let metadata: ModelMetadata = load_json(&sidecar)?;
        tracing::info!(
            "Model metadata: algorithm={}, trained_at={}",
            metadata.algorithm,
            metadata.trained_at
        );
        Some(metadata)
    } else {
        None
    };

    Ok((model, metadata))
}

/// Sidecar path for a model file: the full file name plus `.metadata.json`.
pub fn metadata_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_os_string();
    name.push(".metadata.json");
    PathBuf::from(name)
}

/// Size of a file on disk, human-readable.
pub fn get_size(path: impl AsRef<Path>) -> Result<String> {
    Ok(format_size(fs::metadata(path.as_ref())?.len()))
}

/// `"{n} B"` below 1 KiB, `"{:.2} KB"` below 1 MiB, `"{:.2} MB"` above.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * KB;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct LogisticModel {
        weights: Vec<f64>,
        bias: f64,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Params {
        target: String,
        test_size: f64,
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("params.yaml");

        let params = Params { target: "churn".to_string(), test_size: 0.2 };
        save_yaml(&path, &params).unwrap();

        let loaded: Params = read_yaml(&path).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_read_yaml_rejects_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "").unwrap();

        let err = read_yaml::<Params>(&path).unwrap_err();
        assert!(matches!(err, ChurnError::EmptyFileError { .. }));

        // comment-only files count as empty too
        fs::write(&path, "# nothing here yet\n").unwrap();
        let err = read_yaml::<Params>(&path).unwrap_err();
        assert!(matches!(err, ChurnError::EmptyFileError { .. }));
    }

    #[test]
    fn test_read_yaml_rejects_documents_with_no_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.yaml");

        for contents in ["{}\n", "[]\n", "''\n"] {
            fs::write(&path, contents).unwrap();
            let err = read_yaml::<Params>(&path).unwrap_err();
            assert!(
                matches!(err, ChurnError::EmptyFileError { .. }),
                "accepted {contents:?}"
            );
        }
    }

    #[test]
    fn test_yaml_lookup_dot_notation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "logging:\n  level: debug\n  dir: logs\n").unwrap();

        let doc = read_yaml_value(&path).unwrap();
        let level = yaml_lookup(&doc, "logging.level").unwrap();
        assert_eq!(level.as_str(), Some("debug"));
        assert!(yaml_lookup(&doc, "logging.missing").is_none());
        assert!(yaml_lookup(&doc, "no.such.path").is_none());
    }

    #[test]
    fn test_json_round_trip_uses_four_space_indent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.json");

        let mut metrics = BTreeMap::new();
        metrics.insert("auc".to_string(), 0.91);
        save_json(&path, &metrics).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"auc\""));

        let loaded: BTreeMap<String, f64> = load_json(&path).unwrap();
        assert_eq!(loaded, metrics);
    }

    #[test]
    fn test_save_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artifacts/eval/metrics.json");
        save_json(&path, &vec![1, 2, 3]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_bin_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let model = LogisticModel {
            weights: vec![0.4, -1.2, 0.07],
            bias: 0.33,
        };
        save_bin(&path, &model).unwrap();
        let loaded: LogisticModel = load_bin(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.csv");

        let mut frame = Frame::new(vec!["customer_id".to_string(), "churn".to_string()]);
        frame
            .push_row(vec!["C-1".to_string(), "0".to_string()])
            .unwrap();
        frame
            .push_row(vec!["C-2".to_string(), "1".to_string()])
            .unwrap();

        save_csv(&frame, &path).unwrap();
        let loaded = load_csv(&path).unwrap();
        assert_eq!(loaded, frame);
        assert_eq!(loaded.shape(), (2, 2));
    }

    #[test]
    fn test_create_directories_is_idempotent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("artifacts/models");
        let logs = dir.path().join("logs");

        create_directories(&[&nested, &logs]).unwrap();
        assert!(nested.is_dir());
        assert!(logs.is_dir());

        // second call is a no-op, not an error
        create_directories(&[&nested, &logs]).unwrap();
    }

    #[test]
    fn test_model_round_trip_with_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models/churn.bin");

        let model = LogisticModel {
            weights: vec![1.0, 2.0],
            bias: -0.5,
        };
        let metadata = ModelMetadata::new("logistic_regression").with_metric("auc", 0.87);

        save_model(&path, &model, Some(&metadata)).unwrap();
        assert!(metadata_path(&path).exists());

        let (loaded, loaded_meta): (LogisticModel, _) = load_model(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded_meta, Some(metadata));
    }

    #[test]
    fn test_model_without_metadata_has_no_sidecar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.bin");

        let model = LogisticModel {
            weights: vec![],
            bias: 0.0,
        };
        save_model(&path, &model, None).unwrap();
        assert!(!metadata_path(&path).exists());

        let (_, metadata): (LogisticModel, _) = load_model(&path).unwrap();
        assert_eq!(metadata, None);
    }

    #[test]
    fn test_metadata_path_appends_to_file_name() {
        let sidecar = metadata_path(Path::new("artifacts/models/churn.bin"));
        assert_eq!(
            sidecar,
            PathBuf::from("artifacts/models/churn.bin.metadata.json")
        );
    }

    #[test]
    fn test_format_size_thresholds() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn test_get_size_reads_real_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, vec![0u8; 2048]).unwrap();
        assert_eq!(get_size(&path).unwrap(), "2.00 KB");
    }
}
