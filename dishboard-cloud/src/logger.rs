//! Logging Infrastructure
//!
//! Console output by default; daily rolling files when a log directory exists.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
const DEFAULT_FILTER: &str = "dishboard_cloud=info,dishboard_carousel=info,tower_http=info";

/// Initialize the global subscriber.
///
/// The returned guard flushes the file writer and must live as long as the
/// process.
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| log_level.and_then(level_filter))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "dishboard-cloud");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            subscriber.with_ansi(false).with_writer(writer).init();
            return Some(guard);
        }
    }

    subscriber.init();
    None
}

/// `LOG_LEVEL=debug` applies to our crates only, keeping dependencies quiet
fn level_filter(level: &str) -> Option<EnvFilter> {
    let level = level.trim().to_ascii_lowercase();
    if level.is_empty() || level == "info" {
        return None;
    }
    if level.parse::<tracing::Level>().is_err() {
        return None;
    }
    EnvFilter::try_new(format!(
        "dishboard_cloud={level},dishboard_carousel={level},tower_http={level}"
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_override() {
        assert!(level_filter("debug").is_some());
        assert!(level_filter(" WARN ").is_some());
        assert!(level_filter("info").is_none());
        assert!(level_filter("loud").is_none());
    }
}
