//! # lvlog
//! Thread-safe leveled logger with pluggable formatters and destinations.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! lvlog = "0.1.0"
//! ```
//!
//! ```rust
//! use lvlog::{Level, logger_config};
//!
//! logger_config()
//!     .with_level(Level::Debug)
//!     .init_global()
//!     .expect("Unable to initialize the logger");
//! lvlog::info!("Hello,", "world!", 42);
//! ```
//!
//! ## Multi-threaded logging
//! Every log call is written in one piece, whatever the number of threads logging.
//! ```rust
//! let handles: Vec<_> = (0..5).map(|i| {
//!     std::thread::spawn(move || lvlog::warn!("Hello, world from thread", i))
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//!
//! ```rust
//! use lvlog::{PlainFormatter, logger_config};
//!
//! let logger = logger_config()
//!     .with_log_file("/tmp/lvlog_app.log")
//!     .with_formatter(PlainFormatter)
//!     .build()
//!     .expect("Unable to open log file");
//! lvlog::error!(logger: logger, "Hello, world!");
//! assert!(std::fs::read_to_string("/tmp/lvlog_app.log").unwrap().ends_with("Hello, world!\n"));
//! ```
//!
//! ## Swapping destinations
//! ```rust
//! use lvlog::{Logger, MemoryDestination};
//!
//! let logger = Logger::default();
//! let memory = MemoryDestination::new();
//! logger.set_destination(memory.clone()).expect("memory destinations always open");
//! lvlog::error!(logger: logger, "captured");
//! assert_eq!(memory.lines().len(), 1);
//! ```

mod macros;

pub use lvlog_core::{
    CloseError, ColoredFormatter, ConsoleDestination, Dbg, Destination, DiagnosticSink,
    FileDestination, FormatError, Formatter, FormatterKind, LVLOG_CONFIG, Lenient, Level,
    LevelSetting, LogError, Logger, LvlogConfig, MemoryDestination, MetaFormatter, Message,
    NullDestination, OpenError, PlainFormatter, SilentDiagnostics, StderrDiagnostics, SwapError,
    WriteError, iso8601,
};

use log::LevelFilter;
use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

/// The process-wide logger used by the convenience macros.
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger.
///
/// This is the logger installed by [`ConfigBuilder::init_global`], or, if
/// nothing was installed before the first call, a console logger configured
/// from `LVLOG_LEVEL` and `LVLOG_FORMAT`.
pub fn global() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(Logger::from_env)
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Nothing was installed; the existing global logger is unchanged.
    #[error("the global logger is already initialized")]
    AlreadyInitialized,
    #[error("unable to open destination: {0}")]
    Open(#[from] OpenError),
    /// The global logger *is* installed, but another logger already serves
    /// the `log` facade. Logging through [`global`] and the lvlog macros works.
    #[error("unable to install the log bridge: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

/// Builder for configuring and initializing a logger.
pub struct ConfigBuilder {
    level: Level,
    formatter: Arc<dyn Formatter>,
    destination: Option<Box<dyn Destination>>,
    no_stdout: bool,
    diagnostics: Arc<dyn DiagnosticSink>,
    log_bridge: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::from_config(&LVLOG_CONFIG)
    }
}

impl ConfigBuilder {
    fn from_config(config: &LvlogConfig) -> Self {
        Self {
            level: config.LEVEL.resolve(),
            formatter: config.FORMAT.build(),
            destination: None,
            no_stdout: false,
            diagnostics: Arc::new(StderrDiagnostics),
            log_bridge: false,
        }
    }

    /// Sets the minimum level.
    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }
    /// Sets the formatter.
    pub fn with_formatter<F: Formatter + 'static>(self, formatter: F) -> Self {
        Self {
            formatter: Arc::new(formatter),
            ..self
        }
    }
    /// Sets the destination. It is opened by [`ConfigBuilder::build`].
    pub fn with_destination<D: Destination + 'static>(self, destination: D) -> Self {
        Self {
            destination: Some(Box::new(destination)),
            ..self
        }
    }
    /// Sets a log file as destination.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.with_destination(FileDestination::new(path))
    }
    /// Maybe sets a log file as destination.
    pub fn maybe_with_log_file<P: AsRef<Path>>(self, path: Option<P>) -> Self {
        match path {
            Some(path) => self.with_log_file(path),
            None => self,
        }
    }
    /// Discard messages instead of printing them when no other destination is set.
    pub fn no_stdout(self) -> Self {
        Self {
            no_stdout: true,
            ..self
        }
    }
    /// Sets where failures inside log calls are reported.
    pub fn with_diagnostics<S: DiagnosticSink + 'static>(self, diagnostics: S) -> Self {
        Self {
            diagnostics: Arc::new(diagnostics),
            ..self
        }
    }
    /// Also route the `log` crate macros through the global logger.
    pub fn with_log_bridge(self) -> Self {
        Self {
            log_bridge: true,
            ..self
        }
    }

    /// Opens the destination and builds a standalone logger.
    pub fn build(self) -> Result<Logger, OpenError> {
        let Self {
            level,
            formatter,
            destination,
            no_stdout,
            diagnostics,
            log_bridge: _,
        } = self;
        let destination = match destination {
            Some(destination) => destination,
            None if no_stdout => Box::new(NullDestination),
            None => Box::new(ConsoleDestination),
        };
        Logger::with_parts(level, formatter, destination, diagnostics)
    }

    /// Builds the logger and installs it as the process-wide one.
    ///
    /// Fails with [`InitError::AlreadyInitialized`] if a global logger exists,
    /// including the default one created by an earlier [`global`] call. A
    /// logger that loses a concurrent initialization has its destination
    /// closed.
    ///
    /// With [`ConfigBuilder::with_log_bridge`], an [`InitError::LogBridge`]
    /// error means the global logger *was* installed and is in use by the
    /// lvlog macros; only the `log` facade hookup failed.
    pub fn init_global(self) -> Result<&'static Logger, InitError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(InitError::AlreadyInitialized);
        }
        let log_bridge = self.log_bridge;
        let logger = install(&GLOBAL_LOGGER, self.build()?)?;
        if log_bridge {
            log::set_logger(logger)?;
            log::set_max_level(LevelFilter::Trace);
        }
        Ok(logger)
    }
}

/// Puts `logger` into `cell`, or closes it if the cell was filled meanwhile.
fn install(cell: &OnceLock<Logger>, logger: Logger) -> Result<&Logger, InitError> {
    let mut candidate = Some(logger);
    let installed = cell.get_or_init(|| candidate.take().unwrap_or_default());
    match candidate {
        None => Ok(installed),
        Some(rejected) => {
            if let Err(error) = rejected.close() {
                eprintln!("Failed to close rejected log destination: {error}");
            }
            Err(InitError::AlreadyInitialized)
        }
    }
}

/// Returns a ConfigBuilder seeded from the environment.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_from_config() {
        let config = LvlogConfig {
            LEVEL: Lenient(LevelSetting::Fixed(Level::Warn)),
            FORMAT: Lenient(FormatterKind::Plain),
        };
        let memory = MemoryDestination::new();
        let logger = ConfigBuilder::from_config(&config)
            .with_destination(memory.clone())
            .build()
            .unwrap();
        assert_eq!(logger.level(), Level::Warn);
        crate::info!(logger: logger, "filtered");
        crate::error!(logger: logger, "kept", 1);
        assert_eq!(memory.lines(), vec!["kept 1"]);
    }

    #[test]
    fn test_builder_defaults_to_console() {
        let logger = logger_config().build().unwrap();
        assert_eq!(logger.destination_name(), "console");
        let logger = logger_config().no_stdout().build().unwrap();
        assert_eq!(logger.destination_name(), "null");
        let logger = logger_config()
            .no_stdout()
            .with_destination(MemoryDestination::new())
            .build()
            .unwrap();
        assert_eq!(logger.destination_name(), "memory");
    }

    #[test]
    fn test_builder_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let logger = logger_config()
            .maybe_with_log_file(Some(&path))
            .with_formatter(MetaFormatter)
            .with_level(Level::Trace)
            .build()
            .unwrap();
        crate::trace!(logger: logger, "Hello,", "world!");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with(" [trace] Hello, world!\n"), "{content}");
    }

    #[test]
    fn test_builder_reports_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = logger_config()
            .with_log_file(dir.path().join("missing").join("app.log"))
            .build();
        assert!(matches!(result, Err(OpenError::Io(_))));
    }

    #[test]
    fn test_install_closes_rejected_logger() {
        use std::sync::atomic::{AtomicBool, Ordering};

        struct Tracked(Arc<AtomicBool>);
        impl Destination for Tracked {
            fn write(&mut self, _line: &str) -> Result<(), WriteError> {
                Ok(())
            }
            fn close(&mut self) -> Result<(), CloseError> {
                self.0.store(true, Ordering::SeqCst);
                Ok(())
            }
        }

        let cell = OnceLock::new();
        let first_closed = Arc::new(AtomicBool::new(false));
        let first = Logger::new(Tracked(Arc::clone(&first_closed))).unwrap();
        let installed = install(&cell, first).unwrap();
        assert!(std::ptr::eq(installed, cell.get().unwrap()));

        let second_closed = Arc::new(AtomicBool::new(false));
        let second = Logger::new(Tracked(Arc::clone(&second_closed))).unwrap();
        let result = install(&cell, second);
        assert!(matches!(result, Err(InitError::AlreadyInitialized)));
        assert!(second_closed.load(Ordering::SeqCst));
        assert!(!first_closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_builder_diagnostics() {
        struct Refusing;
        impl Destination for Refusing {
            fn write(&mut self, _line: &str) -> Result<(), WriteError> {
                Err(WriteError::rejected("read-only"))
            }
        }
        let reported = Arc::new(std::sync::Mutex::new(Vec::new()));
        let logger = {
            let reported = Arc::clone(&reported);
            logger_config()
                .with_destination(Refusing)
                .with_diagnostics(move |error: &LogError| {
                    reported.lock().unwrap().push(error.operation());
                })
                .build()
                .unwrap()
        };
        crate::error!(logger: logger, "lost");
        assert_eq!(*reported.lock().unwrap(), vec!["write"]);
    }
}
