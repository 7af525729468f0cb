//! Timestamp formatting utilities
//!
//! Log lines carry a fixed human-readable local timestamp by default;
//! ISO 8601 and custom strftime formats are available for callers that
//! need them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp format options for log output
///
/// # Examples
///
/// ```
/// use streamlog::core::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::Standard;
/// let timestamp = format.format(&Local::now());
/// // Output: "2025-01-08 10:30:45"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Human-readable seconds precision: `2025-01-08 10:30:45`
    ///
    /// This is the default, and the format every stream's file and console
    /// lines are written with.
    #[default]
    Standard,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+09:00`
    Iso8601,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use streamlog::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Local>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Standard => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}
