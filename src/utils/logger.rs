use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Knobs for [`init`]. Defaults: info level, `logs/` directory, console on,
/// text format, 10 MB per file, 5 backups.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub dir: PathBuf,
    pub console: bool,
    pub format: LogFormat,
    pub max_size_mb: u64,
    pub backup_count: usize,
}

impl Default for LogSettings {
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

/// Install the global subscriber: a size-rotated daily file plus an
/// optional compact console layer. A second call keeps the subscriber that
/// is already installed.
pub fn init(settings: &LogSettings) -> Result<()> {
    fs::create_dir_all(&settings.dir)?;

    let file_name = format!("{}.log", chrono::Local::now().format("%Y-%m-%d"));
    let writer = RotatingWriter::new(
        settings.dir.join(file_name),
        settings.max_size_mb * 1024 * 1024,
        settings.backup_count,
    )?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.level)));

    let file_layer = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .boxed(),
    };

    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    let already_set = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_err();

    if already_set {
        tracing::debug!("Global subscriber already installed, keeping it");
    }
    Ok(())
}

fn default_directives(level: &str) -> String {
    // 詳細層級時依賴套件仍維持 info
    if level.eq_ignore_ascii_case("debug") || level.eq_ignore_ascii_case("trace") {
        format!("churn_pipeline={},info", level)
    } else {
        format!("churn_pipeline={}", level)
    }
}

/// A `MakeWriter` over a single log file with RotatingFileHandler-style
/// rollover: before a write that would grow the file to `max_bytes` or
/// beyond, `<file>` becomes `<file>.1`, `.1` becomes `.2`, and so on up to
/// `backup_count`. `max_bytes = 0` disables rotation; `backup_count = 0`
/// truncates in place.
#[derive(Clone)]
pub struct RotatingWriter {
    inner: Arc<Mutex<RotatingFile>>,
}

impl RotatingWriter {
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            inner: Arc::new(Mutex::new(RotatingFile {
                path,
                file,
                written,
                max_bytes,
                backup_count,
            })),
        })
    }
}

struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backup_count: usize,
}

impl RotatingFile {
    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0 && self.written > 0 && self.written + incoming as u64 >= self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backup_count == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = backup_path(&self.path, self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backup_count).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, backup_path(&self.path, 1))?;

        self.file = File::create(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn write_chunk(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

impl io::Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer mutex poisoned"))?;
        inner.write_chunk(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer mutex poisoned"))?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingWriter {
    type Writer = RotatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
