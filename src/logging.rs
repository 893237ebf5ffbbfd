// Logging initialisation
//
// The terminal belongs to the UI, so nothing is written to stdout/stderr.
// With `REMY_LOG=1`, structured logs go to `remy.log` in the XDG data dir
// (filtered by `RUST_LOG`, default `info`). Otherwise no subscriber is
// installed and tracing macros are no-ops.

use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking writer alive; hold it until the process exits
pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install the global tracing subscriber. Call once from `main`.
pub fn init() -> LogGuard {
    if std::env::var("REMY_LOG").as_deref() != Ok("1") {
        return LogGuard { _file_guard: None };
    }

    let dir = log_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    let _ = std::fs::create_dir_all(&dir);
    let file_appender = tracing_appender::rolling::never(dir, "remy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .init();

    LogGuard {
        _file_guard: Some(guard),
    }
}

fn log_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("remy");
        return Some(p);
    }
    let home = std::env::var("HOME").ok()?;
    let mut p = PathBuf::from(home);
    #[cfg(target_os = "macos")]
    {
        p.push("Library");
        p.push("Logs");
    }
    #[cfg(not(target_os = "macos"))]
    {
        p.push(".local");
        p.push("share");
    }
    p.push("remy");
    Some(p)
}
