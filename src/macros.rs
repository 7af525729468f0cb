//! Logging macros for the leveled registry entry points.
//!
//! Each macro takes the registry, the stream name, and a variadic list of
//! displayable arguments, and captures the call site so the emitted line
//! carries the enclosing function, file, and line. A call with no
//! arguments registers the stream but emits nothing.
//!
//! # Examples
//!
//! ```
//! use streamlog::prelude::*;
//! use streamlog::info;
//!
//! let dir = std::env::temp_dir().join("streamlog-doc");
//! let registry = LogRegistry::new(dir);
//!
//! // Basic logging
//! info!(registry, "server", "listening");
//!
//! // Multiple arguments are joined with spaces
//! let port = 8080;
//! info!(registry, "server", "listening on port", port);
//! ```

/// Capture the current call site: enclosing function path, source file,
/// and line.
///
/// The function path is recovered from the type name of a local item, so
/// the capture is fully resolved at compile time.
#[macro_export]
macro_rules! callsite {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        $crate::core::callsite::CallSite::new(name, file!(), line!())
    }};
}

/// Log on a named stream at an explicit level.
///
/// # Examples
///
/// ```
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::log;
/// log!(registry, "api", LogLevel::Info, "request handled");
/// log!(registry, "api", LogLevel::Error, "status", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($registry:expr, $stream:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $registry.log_at(
            $stream,
            $level,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
            $crate::callsite!(),
        )
    };
}

/// Log a debug-level message on a named stream.
///
/// # Examples
///
/// ```
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::debug;
/// debug!(registry, "cache", "lookup miss");
/// debug!(registry, "cache", "entries:", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($registry, $stream, $crate::LogLevel::Debug $(, $arg)*)
    };
}

/// Log an info-level message on a named stream.
///
/// # Examples
///
/// ```
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::info;
/// info!(registry, "app", "started");
/// info!(registry, "app", "processing", 100, "items");
/// ```
#[macro_export]
macro_rules! info {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($registry, $stream, $crate::LogLevel::Info $(, $arg)*)
    };
}

/// Log a warning-level message on a named stream.
///
/// # Examples
///
/// ```
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::warn;
/// warn!(registry, "disk", "low space");
/// ```
#[macro_export]
macro_rules! warn {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($registry, $stream, $crate::LogLevel::Warn $(, $arg)*)
    };
}

/// Log an error-level message on a named stream.
///
/// # Examples
///
/// ```
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::error;
/// error!(registry, "db", "connection refused");
/// ```
#[macro_export]
macro_rules! error {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($registry, $stream, $crate::LogLevel::Error $(, $arg)*)
    };
}

/// Log a fatal-level message on a named stream, flush it, and terminate
/// the process.
///
/// # Examples
///
/// ```no_run
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::fatal;
/// fatal!(registry, "app", "unrecoverable state");
/// ```
#[macro_export]
macro_rules! fatal {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $registry.fatal_at(
            $stream,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
            $crate::callsite!(),
        )
    };
}

/// Log a panic-level message on a named stream, flush it, and raise a
/// panic carrying the message.
///
/// Named `panic_log!` so call sites keep unambiguous access to
/// `std::panic!`.
///
/// # Examples
///
/// ```no_run
/// # use streamlog::prelude::*;
/// # let registry = LogRegistry::new(std::env::temp_dir().join("streamlog-doc"));
/// use streamlog::panic_log;
/// panic_log!(registry, "app", "invariant violated");
/// ```
#[macro_export]
macro_rules! panic_log {
    ($registry:expr, $stream:expr $(, $arg:expr)* $(,)?) => {
        $registry.panic_at(
            $stream,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
            $crate::callsite!(),
        )
    };
}
