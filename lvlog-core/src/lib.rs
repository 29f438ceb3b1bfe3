//! # lvlog-core
//! Core types for lvlog - levels, messages, formatters, destinations and the
//! logger coordinator.

mod bridge;
mod config;
mod destination;
mod diagnostics;
mod error;
mod formatter;
mod level;
mod logger;
mod message;

pub use config::{
    FormatterKind, LVLOG_CONFIG, Lenient, LevelSetting, LvlogConfig, ParseFormatterKindError,
};
pub use destination::{
    ConsoleDestination, Destination, FileDestination, MemoryDestination, NullDestination,
};
pub use diagnostics::{DiagnosticSink, SilentDiagnostics, StderrDiagnostics};
pub use error::{CloseError, FormatError, LogError, OpenError, SwapError, WriteError};
pub use formatter::{ColoredFormatter, Formatter, MetaFormatter, PlainFormatter, iso8601};
pub use level::{Level, ParseLevelError};
pub use logger::{Dbg, Logger};
pub use message::Message;
