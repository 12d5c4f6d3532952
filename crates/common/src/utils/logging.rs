use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use configs::{LogConfig, LogFormat};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber from the `[log]` section.
/// - Same filter rules as [`init_logging_default`]
/// - `format` selects compact text or JSON lines
/// - With `dir` set, every event also goes to `<dir>/all.log` (appended)
pub fn init_logging(cfg: &LogConfig) -> anyhow::Result<()> {
    let writer = match cfg.dir.as_deref() {
        Some(dir) => {
            let file = open_log_file(Path::new(dir))?;
            BoxMakeWriter::new(io::stdout.and(Mutex::new(file)))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(writer);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = match cfg.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(())
}

fn open_log_file(dir: &Path) -> anyhow::Result<File> {
    fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("cannot create log dir {}: {e}", dir.display()))?;
    let path = dir.join("all.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| anyhow::anyhow!("cannot open {}: {e}", path.display()))
}
