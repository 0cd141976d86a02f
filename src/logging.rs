//! File logging
//!
//! The terminal belongs to the UI, so logs only go to
//! `<data_dir>/logs/tabula.log` with daily rotation. Filtering follows
//! `RUST_LOG` (e.g. `RUST_LOG=tabula::model=trace`), defaulting to `info`.

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init(logs_dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        eprintln!("Warning: Could not initialize file logging: {}", e);
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(logs_dir, "tabula.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Warning: Could not initialize file logging: {}", e);
    }
}
