//! The log registry: named streams, created lazily, swept globally
//!
//! A [`LogRegistry`] owns the mapping from stream name to [`Logger`]. The
//! first leveled call against an unseen name constructs a logger wired to
//! the console and to a date-rotated file under the registry's base
//! directory; later calls reuse it. [`LogRegistry::set_global_level`]
//! re-thresholds every stream registered so far in one sweep.

use super::{
    callsite::CallSite,
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::Logger,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

/// Registry of named log streams sharing one rotation policy
pub struct LogRegistry {
    base_dir: PathBuf,
    policy: RotationPolicy,
    default_level: LogLevel,
    reapply_global_level: bool,
    last_global_level: RwLock<Option<LogLevel>>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LogRegistry {
    /// Create a registry with the stock configuration: 7 days retention,
    /// 24 hour rotation, Info threshold for new streams.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::builder(base_dir).build()
    }

    /// Create a builder for a registry with custom settings
    ///
    /// # Example
    /// ```
    /// use streamlog::prelude::*;
    /// use std::time::Duration;
    ///
    /// let registry = LogRegistry::builder("/tmp/logs")
    ///     .retention(Duration::from_secs(2 * 24 * 3600))
    ///     .rotation_interval(Duration::from_secs(3600))
    ///     .default_level(LogLevel::Debug)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(base_dir: impl Into<PathBuf>) -> RegistryBuilder {
        RegistryBuilder::new(base_dir)
    }

    /// Directory the rotated files live under
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Rotation policy applied to every stream created by this registry
    #[must_use]
    pub fn rotation_policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Whether a stream has been created for `name`
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Number of streams created so far
    #[must_use]
    pub fn stream_count(&self) -> usize {
        self.loggers.read().len()
    }

    /// Look up the logger for `name`, creating it on first use.
    ///
    /// Lookup takes the shared lock; a miss retries under the exclusive
    /// lock so concurrent first-use of the same name constructs exactly
    /// one logger.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        let logger = loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(self.build_logger(name)));
        Arc::clone(logger)
    }

    /// Construct a stream: console always, file sink if it can be opened.
    ///
    /// A file-sink failure is recorded through the console-only path and
    /// the stream is registered anyway, degraded to console output.
    fn build_logger(&self, name: &str) -> Logger {
        let logger = Logger::new(name);
        logger.set_min_level(self.effective_default_level());
        logger.add_appender(Box::new(ConsoleAppender::new()));

        match RotatingFileAppender::with_policy(&self.base_dir, name, self.policy.clone()) {
            Ok(sink) => logger.add_appender(Box::new(sink)),
            Err(e) => {
                logger.error(format!(
                    "failed to configure file sink for stream '{}': {}",
                    name, e
                ));
            }
        }

        logger
    }

    /// Threshold for a newly-created stream. Normally the registry default;
    /// in corrected mode the most recent global sweep level wins.
    fn effective_default_level(&self) -> LogLevel {
        if self.reapply_global_level {
            if let Some(level) = *self.last_global_level.read() {
                return level;
            }
        }
        self.default_level
    }

    /// Emit `args` on the named stream at `level`.
    ///
    /// The stream is registered before the empty-argument guard fires: a
    /// zero-argument call creates the logger but emits nothing.
    pub fn log(&self, name: &str, level: LogLevel, args: &[&dyn fmt::Display]) {
        let logger = self.logger(name);
        if args.is_empty() {
            return;
        }
        logger.log(level, join_args(args));
    }

    /// Emit with an explicit caller location (the leveled macros route
    /// through here)
    pub fn log_at(
        &self,
        name: &str,
        level: LogLevel,
        args: &[&dyn fmt::Display],
        site: CallSite,
    ) {
        let logger = self.logger(name);
        if args.is_empty() {
            return;
        }
        logger.log_at(level, join_args(args), Some(site));
    }

    /// Log at Fatal, flush the stream, and terminate the process.
    ///
    /// The empty-argument guard applies here too: a zero-argument call
    /// registers the stream and returns without terminating.
    pub fn fatal_at(&self, name: &str, args: &[&dyn fmt::Display], site: CallSite) {
        let logger = self.logger(name);
        if args.is_empty() {
            return;
        }
        logger.log_at(LogLevel::Fatal, join_args(args), Some(site));
        if let Err(e) = logger.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush stream '{}': {}", name, e);
        }
        process::exit(1);
    }

    /// Log at Panic, flush the stream, and raise a panic carrying the
    /// message.
    ///
    /// Subject to the same empty-argument guard as [`Self::fatal_at`].
    pub fn panic_at(&self, name: &str, args: &[&dyn fmt::Display], site: CallSite) {
        let logger = self.logger(name);
        if args.is_empty() {
            return;
        }
        let message = join_args(args);
        logger.log_at(LogLevel::Panic, message.clone(), Some(site));
        if let Err(e) = logger.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush stream '{}': {}", name, e);
        }
        panic!("{}", message);
    }

    /// Apply a threshold to every currently-registered stream.
    ///
    /// Accepts exactly `"debug"`, `"info"`, or `"error"`; anything else
    /// returns [`LoggerError::InvalidLevel`] and mutates nothing. The sweep
    /// holds the exclusive registry lock so no stream is created while it
    /// runs. Streams created afterwards get the registry default again
    /// unless the corrected mode is on
    /// ([`RegistryBuilder::reapply_global_level`]).
    pub fn set_global_level(&self, level_name: &str) -> Result<()> {
        let level = match level_name {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "error" => LogLevel::Error,
            _ => return Err(LoggerError::invalid_level(level_name)),
        };

        let loggers = self.loggers.write();
        for logger in loggers.values() {
            logger.set_min_level(level);
        }
        if self.reapply_global_level {
            *self.last_global_level.write() = Some(level);
        }
        Ok(())
    }

    /// Flush every registered stream
    pub fn flush_all(&self) -> Result<()> {
        let loggers = self.loggers.read();
        for logger in loggers.values() {
            logger.flush()?;
        }
        Ok(())
    }
}

/// Render the variadic argument list as a single space-joined message
fn join_args(args: &[&dyn fmt::Display]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builder for constructing a [`LogRegistry`] with a fluent API
///
/// # Example
/// ```
/// use streamlog::prelude::*;
/// use std::time::Duration;
///
/// let registry = LogRegistry::builder("/tmp/logs")
///     .rotation_interval(Duration::from_secs(3600))
///     .reapply_global_level(true)
///     .build();
/// ```
pub struct RegistryBuilder {
    base_dir: PathBuf,
    policy: RotationPolicy,
    default_level: LogLevel,
    reapply_global_level: bool,
}

impl RegistryBuilder {
    /// Create a new builder with the stock configuration
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            policy: RotationPolicy::default(),
            default_level: LogLevel::Info,
            reapply_global_level: false,
        }
    }

    /// Set how long rotated files are kept
    #[must_use = "builder methods return a new value"]
    pub fn retention(mut self, retention: Duration) -> Self {
        self.policy = self.policy.with_retention(retention);
        self
    }

    /// Set how often streams roll to a new file
    #[must_use = "builder methods return a new value"]
    pub fn rotation_interval(mut self, interval: Duration) -> Self {
        self.policy = self.policy.with_interval(interval);
        self
    }

    /// Set the threshold newly-created streams start at
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Corrected mode: seed streams created after a global sweep with the
    /// swept level instead of the registry default.
    ///
    /// Off by default, preserving the historical behavior where a stream
    /// created after `set_global_level("error")` still starts at Info.
    #[must_use = "builder methods return a new value"]
    pub fn reapply_global_level(mut self, enabled: bool) -> Self {
        self.reapply_global_level = enabled;
        self
    }

    /// Build the registry
    pub fn build(self) -> LogRegistry {
        LogRegistry {
            base_dir: self.base_dir,
            policy: self.policy,
            default_level: self.default_level,
            reapply_global_level: self.reapply_global_level,
            last_global_level: RwLock::new(None),
            loggers: RwLock::new(HashMap::new()),
        }
    }
}
