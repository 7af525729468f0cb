//! Core logger types and traits

pub mod appender;
pub mod callsite;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod registry;
pub mod timestamp;

pub use appender::Appender;
pub use callsite::CallSite;
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use registry::{LogRegistry, RegistryBuilder};
pub use timestamp::TimestampFormat;
