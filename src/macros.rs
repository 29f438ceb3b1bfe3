//! Variadic entry points. Every item must implement `Display`; wrap the
//! others in [`Dbg`](crate::Dbg). Items are only rendered when the level
//! passes the logger's filter.
//!
//! Without a target the process-wide logger from [`global`](crate::global)
//! is used; `logger: <expr>,` targets a specific one.

/// Logs the items at the given level.
///
/// ```rust
/// use lvlog::{Level, Logger, MemoryDestination, PlainFormatter};
///
/// let memory = MemoryDestination::new();
/// let logger = Logger::new(memory.clone()).unwrap();
/// logger.set_formatter(PlainFormatter);
/// lvlog::log!(logger: logger, Level::Warn, "a", 1, true);
/// assert_eq!(memory.lines(), vec!["a 1 true"]);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr $(, $item:expr)* $(,)?) => {
        $logger.log($level, &[$(&$item as &dyn ::core::fmt::Display),*])
    };
    ($level:expr $(, $item:expr)* $(,)?) => {
        $crate::global().log($level, &[$(&$item as &dyn ::core::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Level::Trace $(, $item)*)
    };
    ($($item:expr),* $(,)?) => {
        $crate::log!($crate::Level::Trace $(, $item)*)
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Level::Debug $(, $item)*)
    };
    ($($item:expr),* $(,)?) => {
        $crate::log!($crate::Level::Debug $(, $item)*)
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Level::Info $(, $item)*)
    };
    ($($item:expr),* $(,)?) => {
        $crate::log!($crate::Level::Info $(, $item)*)
    };
}

#[macro_export]
macro_rules! warn {
    (logger: $logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Level::Warn $(, $item)*)
    };
    ($($item:expr),* $(,)?) => {
        $crate::log!($crate::Level::Warn $(, $item)*)
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Level::Error $(, $item)*)
    };
    ($($item:expr),* $(,)?) => {
        $crate::log!($crate::Level::Error $(, $item)*)
    };
}
