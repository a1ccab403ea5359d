//! Logging Infrastructure
//!
//! Structured logging for the settlement tools:
//! - Console output, pretty for development and JSON for production
//! - Optional daily rotating application logs (deleted after 14 days)
//! - Optional daily audit logs for console writes (never deleted)
//!
//! Write-side services log status changes, approvals and settings edits with
//! `target: "audit"`; those events go to `<log_dir>/audit` only.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Application log retention
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

const APP_PREFIX: &str = "app";
const AUDIT_PREFIX: &str = "audit";
const LOG_SUFFIX: &str = "log";

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync + 'static>;

/// Clean up application log files older than `retention_days`
///
/// Files are named `app.YYYY-MM-DD.log` by the rolling appender. Audit logs
/// are never touched. Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join(APP_PREFIX);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Local::now() - chrono::Duration::days(retention_days);
    let mut removed = 0;

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = log_file_date(name) else {
            continue;
        };
        let Some(file_day) = Local
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
        else {
            continue;
        };
        if file_day < cutoff {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

/// Date part of `app.YYYY-MM-DD.log`
fn log_file_date(name: &str) -> Option<NaiveDate> {
    let date_part = name
        .strip_prefix(APP_PREFIX)?
        .strip_prefix('.')?
        .strip_suffix(LOG_SUFFIX)?
        .strip_suffix('.')?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix(LOG_SUFFIX)
        .build(dir)?)
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(json_format: bool, appender: RollingFileAppender, audit: bool) -> BoxedLayer {
    let is_audit = move |target: &str| (target == AUDIT_PREFIX) == audit;
    let writer = std::sync::Mutex::new(appender);
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(filter_fn(move |meta| is_audit(meta.target())))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter_fn(move |meta| is_audit(meta.target())))
            .boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` takes precedence
/// * `json_format` - JSON output (production) or pretty output (development)
/// * `log_dir` - Optional directory for rotating file logs
///
/// When a Tokio runtime is running, an hourly task prunes application logs
/// older than [`APP_LOG_RETENTION_DAYS`].
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log = daily_appender(&log_dir.join(APP_PREFIX), APP_PREFIX)?;
        let audit_log = daily_appender(&log_dir.join(AUDIT_PREFIX), AUDIT_PREFIX)?;
        layers.push(file_layer(json_format, app_log, false));
        layers.push(file_layer(json_format, audit_log, true));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(periodic_cleanup(log_dir.to_path_buf()));
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    Ok(())
}

/// Periodic cleanup task - runs every hour
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir, APP_LOG_RETENTION_DAYS) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_date() {
        assert_eq!(
            log_file_date("app.2024-03-09.log"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
        assert_eq!(log_file_date("audit.2024-03-09.log"), None);
        assert_eq!(log_file_date("app.2024-03-09"), None);
        assert_eq!(log_file_date("app.yesterday.log"), None);
    }

    #[test]
    fn test_cleanup_removes_only_expired_app_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("app");
        fs::create_dir_all(&app_dir).unwrap();

        let today = Local::now().date_naive();
        let old = today - chrono::Duration::days(30);
        let old_name = format!("app.{}.log", old.format("%Y-%m-%d"));
        let fresh_name = format!("app.{}.log", today.format("%Y-%m-%d"));
        fs::write(app_dir.join(&old_name), "old").unwrap();
        fs::write(app_dir.join(&fresh_name), "fresh").unwrap();
        fs::write(app_dir.join("notes.txt"), "keep").unwrap();

        let removed = cleanup_old_logs(dir.path(), APP_LOG_RETENTION_DAYS).unwrap();
        assert_eq!(removed, 1);
        assert!(!app_dir.join(&old_name).exists());
        assert!(app_dir.join(&fresh_name).exists());
        assert!(app_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_without_app_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(dir.path(), 14).unwrap(), 0);
    }
}
