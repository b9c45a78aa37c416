use std::env;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logger() -> impl Drop {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/mediasort.log".to_string());
    let log_file_path = Path::new(&log_file_path);
    let log_dir = log_file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("./"));
    let log_name = log_file_path
        .file_name()
        .unwrap_or_else(|| OsStr::new("mediasort.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .compact()
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter_layer)
        .init();

    debug!("Logging to stdout and {}", log_file_path.display());

    guard
}
