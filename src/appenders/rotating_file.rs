//! Rotating file appender with date-named log files
//!
//! Each log stream writes to `<dir>/<YYYY-MM-DD>--<stream>.log`, rolling to
//! a new file whenever the rotation window elapses. A `<stream>.log` alias
//! always points at the active file, and files whose date falls outside the
//! retention window are pruned at every rotation.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::core::timestamp::TimestampFormat;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shared rotation configuration: how long files are kept and how often a
/// new one is started.
///
/// # Examples
///
/// ```
/// use streamlog::appenders::RotationPolicy;
/// use std::time::Duration;
///
/// // Keep two days of logs, roll hourly
/// let policy = RotationPolicy::new()
///     .with_retention(Duration::from_secs(2 * 24 * 3600))
///     .with_interval(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum age of a rotated file before it is deleted
    pub retention: Duration,
    /// Length of one rotation window
    pub interval: Duration,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(7 * 24 * 3600),
            interval: Duration::from_secs(24 * 3600),
        }
    }
}

impl RotationPolicy {
    /// Create a rotation policy with the default settings (7 days retention,
    /// 24 hour rotation)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention window
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Set the rotation interval
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start of the rotation window containing `now`, in epoch seconds.
    ///
    /// Windows are aligned by truncating epoch time to the interval, so
    /// every call site within the same window agrees on the active file.
    #[must_use]
    pub fn window_start(&self, now: &DateTime<Local>) -> i64 {
        let interval = self.interval.as_secs().max(1) as i64;
        let secs = now.timestamp();
        secs - secs.rem_euclid(interval)
    }
}

/// File appender that rolls to a new date-named file per rotation window
pub struct RotatingFileAppender {
    dir: PathBuf,
    stream: String,
    policy: RotationPolicy,
    timestamp_format: TimestampFormat,
    writer: Option<BufWriter<File>>,
    current_path: PathBuf,
    window_start: i64,
}

impl RotatingFileAppender {
    /// Create an appender for `stream` under `dir` with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or the active file cannot be created
    pub fn new(dir: impl AsRef<Path>, stream: impl Into<String>) -> Result<Self> {
        Self::with_policy(dir, stream, RotationPolicy::default())
    }

    /// Create an appender with a custom rotation policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or the active file cannot be created
    pub fn with_policy(
        dir: impl AsRef<Path>,
        stream: impl Into<String>,
        policy: RotationPolicy,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let stream = stream.into();

        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let window_start = policy.window_start(&Local::now());
        let mut appender = Self {
            dir,
            stream,
            policy,
            timestamp_format: TimestampFormat::default(),
            writer: None,
            current_path: PathBuf::new(),
            window_start,
        };
        appender.open_window(window_start)?;
        Ok(appender)
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Path of the currently-active file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }

    /// Path of the stable alias that tracks the active file
    #[must_use]
    pub fn link_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stream))
    }

    /// Get the rotation policy
    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// File name for the window starting at `window_start` epoch seconds
    fn file_name(&self, window_start: i64) -> String {
        let date = match DateTime::from_timestamp(window_start, 0) {
            Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            None => Local::now().format("%Y-%m-%d").to_string(),
        };
        format!("{}--{}.log", date, self.stream)
    }

    fn should_rotate(&self, now: &DateTime<Local>) -> bool {
        self.policy.window_start(now) != self.window_start
    }

    /// Open the file for the given window, repoint the alias, and prune
    /// expired files
    fn open_window(&mut self, window_start: i64) -> Result<()> {
        let path = self.dir.join(self.file_name(window_start));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_path = path;
        self.window_start = window_start;

        self.update_link();
        self.prune_expired();
        Ok(())
    }

    /// Flush the outgoing file and switch to the window starting at
    /// `window_start`
    fn rotate_to(&mut self, window_start: i64) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.current_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
            // Writer is dropped here, releasing the file handle
        }
        self.open_window(window_start)
    }

    /// Point `<stream>.log` at the active file. Best effort: a broken alias
    /// never blocks logging.
    fn update_link(&self) {
        let link = self.link_path();

        #[cfg(unix)]
        {
            if let Err(e) = fs::remove_file(&link) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    eprintln!(
                        "[WARN] Failed to remove stale link {}: {}",
                        link.display(),
                        e
                    );
                }
            }
            // Link to the file name, not the absolute path, so the log
            // directory can be relocated without breaking the alias
            if let Some(target) = self.current_path.file_name() {
                if let Err(e) = std::os::unix::fs::symlink(target, &link) {
                    eprintln!("[WARN] Failed to update link {}: {}", link.display(), e);
                }
            }
        }

        #[cfg(not(unix))]
        let _ = link;
    }

    /// Delete files for this stream whose filename date is past retention.
    /// Best effort: a failed deletion is reported and retried at the next
    /// rotation.
    fn prune_expired(&self) {
        let retention = match chrono::Duration::from_std(self.policy.retention) {
            Ok(d) => d,
            Err(_) => return,
        };
        let cutoff = Local::now().date_naive() - retention;
        let suffix = format!("--{}.log", self.stream);

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[WARN] Failed to scan {} for expired logs: {}",
                    self.dir.display(),
                    e
                );
                return;
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(name) => name,
                None => continue,
            };
            let date_part = match name.strip_suffix(&suffix) {
                Some(date_part) => date_part,
                None => continue,
            };
            let date = match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) => continue,
            };
            if date < cutoff {
                if let Err(e) = fs::remove_file(entry.path()) {
                    eprintln!(
                        "[WARN] Failed to remove expired log {}: {}",
                        entry.path().display(),
                        e
                    );
                }
            }
        }
    }

    /// Try to reopen the active file (used for recovery after a rotation
    /// failure)
    fn try_reopen_file(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to reopen after rotation failure: {}", e),
                )
            })
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let now = Local::now();
        if self.should_rotate(&now) {
            let window = self.policy.window_start(&now);
            if let Err(e) = self.rotate_to(window) {
                // Rotation failed - keep the stream alive on the previous
                // file rather than losing entries
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    match Self::try_reopen_file(&self.current_path) {
                        Ok(file) => self.writer = Some(BufWriter::new(file)),
                        Err(reopen_err) => {
                            eprintln!(
                                "[ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }
            }
        }

        let line = format!(
            "[{}] [{:5}] {}{}\n",
            self.timestamp_format.format(&entry.timestamp),
            entry.level.to_str(),
            entry.message,
            entry.callsite_suffix()
        );

        match self.writer {
            Some(ref mut writer) => {
                writer.write_all(line.as_bytes()).map_err(|e| {
                    LoggerError::file_appender(
                        self.current_path.display().to_string(),
                        format!("Failed to write log entry: {}", e),
                    )
                })?;
                Ok(())
            }
            None => Err(LoggerError::writer("Writer not initialized")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.current_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            // Best effort flush - ignore errors during drop
            let _ = writer.flush();
        }
    }
}
