//! # Streamlog
//!
//! Named log streams with date-rotated files, console mirroring, and a
//! global level sweep.
//!
//! ## Features
//!
//! - **Lazy Streams**: the first leveled call against a name creates its
//!   logger; later calls reuse it
//! - **Date Rotation**: one file per stream per rotation window, a stable
//!   alias tracking the active file, retention-based pruning
//! - **Thread Safe**: the registry map and every threshold sit behind
//!   reader-writer locks
//! - **Caller Locations**: every line carries the function, file, and line
//!   of its call site
//!
//! ## Example
//!
//! ```
//! use streamlog::prelude::*;
//! use streamlog::{info, warn};
//!
//! let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
//!
//! info!(registry, "server", "listening on port", 8080);
//! warn!(registry, "server", "high connection count");
//!
//! registry.set_global_level("error").unwrap();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        Appender, CallSite, LogEntry, LogLevel, LogRegistry, Logger, LoggerError,
        RegistryBuilder, Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use core::{
    Appender, CallSite, LogEntry, LogLevel, LogRegistry, Logger, LoggerError, RegistryBuilder,
    Result, TimestampFormat,
};
