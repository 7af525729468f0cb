//! Per-stream logger implementation

use super::{
    appender::Appender,
    callsite::CallSite,
    error::Result,
    log_entry::LogEntry,
    log_level::LogLevel,
};
use parking_lot::RwLock;

/// A single named log stream: its own severity threshold and its own
/// output sinks.
///
/// Loggers are created by the registry on first use of a stream name and
/// shared behind an `Arc` afterwards. The threshold is the only mutable
/// configuration; the appender set is fixed once construction finishes.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Info),
            appenders: RwLock::new(Vec::new()),
        }
    }

    /// Stream name this logger was registered under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        let mut appenders = self.appenders.write();
        appenders.push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        let mut min_level = self.min_level.write();
        *min_level = level;
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_at(level, message, None);
    }

    /// Emit at `level` with an optional caller location.
    ///
    /// An appender failure is reported on stderr and does not stop the
    /// remaining appenders from receiving the entry.
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        callsite: Option<CallSite>,
    ) {
        if level < *self.min_level.read() {
            return;
        }

        let mut entry = LogEntry::new(level, message.into());
        if let Some(site) = callsite {
            entry = entry.with_callsite(site);
        }

        let mut appenders = self.appenders.write();
        for (idx, appender) in appenders.iter_mut().enumerate() {
            if let Err(e) = appender.append(&entry) {
                eprintln!(
                    "[LOGGER ERROR] Appender #{} ({}) failed for stream '{}': {}",
                    idx,
                    appender.name(),
                    self.name,
                    e
                );
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingAppender {
        appended: Arc<AtomicUsize>,
    }

    impl Appender for CountingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            self.appended.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::other("simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn counted_logger() -> (Logger, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let logger = Logger::new("test");
        logger.add_appender(Box::new(CountingAppender {
            appended: Arc::clone(&count),
        }));
        (logger, count)
    }

    #[test]
    fn test_default_threshold_is_info() {
        let logger = Logger::new("t");
        assert_eq!(logger.min_level(), LogLevel::Info);
    }

    #[test]
    fn test_threshold_filters_lower_levels() {
        let (logger, count) = counted_logger();

        logger.debug("dropped");
        assert_eq!(count.load(Ordering::Relaxed), 0);

        logger.info("kept");
        logger.error("kept");
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_threshold_can_be_raised_and_lowered() {
        let (logger, count) = counted_logger();

        logger.set_min_level(LogLevel::Error);
        logger.warn("dropped");
        assert_eq!(count.load(Ordering::Relaxed), 0);

        logger.set_min_level(LogLevel::Debug);
        logger.debug("kept");
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_failing_appender_does_not_stop_others() {
        let count = Arc::new(AtomicUsize::new(0));
        let logger = Logger::new("t");
        logger.add_appender(Box::new(FailingAppender));
        logger.add_appender(Box::new(CountingAppender {
            appended: Arc::clone(&count),
        }));

        logger.info("message");
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
