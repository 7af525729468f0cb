//! Log entry structure

use super::callsite::CallSite;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub callsite: Option<CallSite>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Local::now(),
            callsite: None,
        }
    }

    pub fn with_callsite(mut self, callsite: CallSite) -> Self {
        self.callsite = Some(callsite);
        self
    }

    /// Caller-location suffix for this entry, or an empty string when the
    /// entry was emitted without one.
    pub fn callsite_suffix(&self) -> String {
        self.callsite.map(|s| s.suffix()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "a\nb\rc\td".to_string());
        assert_eq!(entry.message, "a\\nb\\rc\\td");
    }

    #[test]
    fn test_suffix_empty_without_callsite() {
        let entry = LogEntry::new(LogLevel::Info, "msg".to_string());
        assert_eq!(entry.callsite_suffix(), "");
    }

    #[test]
    fn test_suffix_with_callsite() {
        let entry = LogEntry::new(LogLevel::Warn, "msg".to_string())
            .with_callsite(CallSite::new("a::b", "src/b.rs", 9));
        assert_eq!(entry.callsite_suffix(), " -->path: [func:b(b.rs:9)]");
    }
}
