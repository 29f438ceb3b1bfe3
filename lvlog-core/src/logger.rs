use std::{
    fmt::{self, Display, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use crate::{
    config::LVLOG_CONFIG,
    destination::{ConsoleDestination, Destination},
    diagnostics::{DiagnosticSink, StderrDiagnostics},
    error::{CloseError, FormatError, LogError, OpenError, SwapError},
    formatter::{Formatter, MetaFormatter},
    level::Level,
    message::Message,
};

/// Everything a log call reads. Guarded as a whole by a single mutex.
struct LoggerState {
    level: Level,
    formatter: Arc<dyn Formatter>,
    destination: Box<dyn Destination>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

/// Thread-safe leveled logger.
///
/// Holds one minimum level, one formatter and one destination. Every access
/// to them, including the formatting and writing of a message, is serialized
/// through one lock: concurrent log calls never interleave their output and
/// a destination swap never happens in the middle of a write.
///
/// ```rust
/// use lvlog_core::{Level, Logger, MemoryDestination, PlainFormatter};
///
/// let memory = MemoryDestination::new();
/// let logger = Logger::new(memory.clone()).unwrap();
/// logger.set_formatter(PlainFormatter);
/// logger.set_level(Level::Info);
///
/// logger.info(&[&"answer:", &42]);
/// logger.debug(&[&"filtered out"]);
/// assert_eq!(memory.lines(), vec!["answer: 42"]);
/// ```
pub struct Logger {
    state: Mutex<LoggerState>,
}

impl Default for Logger {
    /// Console destination, [`MetaFormatter`], stderr diagnostics and the
    /// build default level.
    fn default() -> Self {
        // ConsoleDestination keeps the no-op `open`, so there is nothing to open.
        Self::from_state(LoggerState {
            level: Level::build_default(),
            formatter: Arc::new(MetaFormatter),
            destination: Box::new(ConsoleDestination),
            diagnostics: Arc::new(StderrDiagnostics),
        })
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("destination", &state.destination.name())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Opens `destination` and builds a logger writing to it, with the
    /// default formatter and level.
    pub fn new<D: Destination + 'static>(destination: D) -> Result<Self, OpenError> {
        Self::with_parts(
            Level::build_default(),
            Arc::new(MetaFormatter),
            Box::new(destination),
            Arc::new(StderrDiagnostics),
        )
    }

    /// Like [`Logger::default`] but with the level and formatter taken from
    /// `LVLOG_LEVEL` and `LVLOG_FORMAT`.
    pub fn from_env() -> Self {
        let logger = Self::default();
        logger.set_level(LVLOG_CONFIG.LEVEL.resolve());
        logger.set_shared_formatter(LVLOG_CONFIG.FORMAT.build());
        logger
    }

    /// Opens `destination` and assembles a logger from explicit parts.
    pub fn with_parts(
        level: Level,
        formatter: Arc<dyn Formatter>,
        mut destination: Box<dyn Destination>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, OpenError> {
        destination.open()?;
        Ok(Self::from_state(LoggerState {
            level,
            formatter,
            destination,
            diagnostics,
        }))
    }

    fn from_state(state: LoggerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// A panicking destination must not disable logging for the whole process.
    fn state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Logs `items`, joined by single spaces, at `level`.
    ///
    /// Nothing is rendered when `level` is below the configured minimum.
    /// Formatting and writing failures are handed to the diagnostic sink;
    /// this method never fails.
    pub fn log(&self, level: Level, items: &[&dyn Display]) {
        if !self.enabled(level) {
            return;
        }
        // Rendered outside the lock so that items whose Display logs
        // cannot deadlock.
        let value = match join_items(items) {
            Ok(value) => value,
            Err(error) => {
                let diagnostics = Arc::clone(&self.state().diagnostics);
                diagnostics.report(&LogError::Format(error));
                return;
            }
        };
        let (result, diagnostics) = {
            let mut state = self.state();
            // the level may have been raised while rendering
            if !level.passes(state.level) {
                return;
            }
            let message = Message::new(value, Utc::now(), level);
            let result = write_message(&mut state, &message);
            (result, Arc::clone(&state.diagnostics))
        };
        if let Err(error) = result {
            diagnostics.report(&error);
        }
    }

    pub fn trace(&self, items: &[&dyn Display]) {
        self.log(Level::Trace, items)
    }

    pub fn debug(&self, items: &[&dyn Display]) {
        self.log(Level::Debug, items)
    }

    pub fn info(&self, items: &[&dyn Display]) {
        self.log(Level::Info, items)
    }

    pub fn warn(&self, items: &[&dyn Display]) {
        self.log(Level::Warn, items)
    }

    pub fn error(&self, items: &[&dyn Display]) {
        self.log(Level::Error, items)
    }

    /// Whether a message at `level` would currently be admitted.
    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.state().level)
    }

    pub fn level(&self) -> Level {
        self.state().level
    }

    pub fn set_level(&self, level: Level) {
        self.state().level = level;
    }

    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.state().formatter)
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        self.set_shared_formatter(Arc::new(formatter));
    }

    pub fn set_shared_formatter(&self, formatter: Arc<dyn Formatter>) {
        self.state().formatter = formatter;
    }

    /// Runs `f` against the active destination, with logging blocked meanwhile.
    pub fn with_destination<R>(&self, f: impl FnOnce(&dyn Destination) -> R) -> R {
        let state = self.state();
        f(&*state.destination)
    }

    pub fn destination_name(&self) -> String {
        self.with_destination(|destination| destination.name().to_string())
    }

    /// Replaces the active destination.
    ///
    /// `destination` is opened first; if that fails it is dropped and the
    /// current destination stays in place. Otherwise the current destination
    /// is closed and the new one installed. A close failure is returned as
    /// [`SwapError::Close`] but does not undo the installation.
    pub fn set_destination<D: Destination + 'static>(
        &self,
        destination: D,
    ) -> Result<(), SwapError> {
        self.set_boxed_destination(Box::new(destination))
    }

    pub fn set_boxed_destination(
        &self,
        mut destination: Box<dyn Destination>,
    ) -> Result<(), SwapError> {
        let mut state = self.state();
        destination.open().map_err(SwapError::Open)?;
        let closed = state.destination.close();
        state.destination = destination;
        closed.map_err(SwapError::Close)
    }

    pub fn set_diagnostics<S: DiagnosticSink + 'static>(&self, diagnostics: S) {
        self.state().diagnostics = Arc::new(diagnostics);
    }

    /// Consumes the logger and closes its destination.
    pub fn close(self) -> Result<(), CloseError> {
        let mut state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        state.destination.close()
    }
}

fn join_items(items: &[&dyn Display]) -> Result<String, FormatError> {
    let mut value = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            value.push(' ');
        }
        write!(value, "{item}")?;
    }
    Ok(value)
}

fn write_message(state: &mut LoggerState, message: &Message) -> Result<(), LogError> {
    let line = state.formatter.format(message)?;
    state
        .destination
        .write(&line)
        .map_err(|source| LogError::Write {
            destination: state.destination.name().to_string(),
            source,
        })
}

/// Renders a value through its `Debug` implementation, for items that have
/// no `Display`.
///
/// ```rust
/// use lvlog_core::{Dbg, Logger, MemoryDestination, PlainFormatter};
///
/// let memory = MemoryDestination::new();
/// let logger = Logger::new(memory.clone()).unwrap();
/// logger.set_formatter(PlainFormatter);
/// logger.error(&[&"got", &Dbg(vec![1, 2])]);
/// assert_eq!(memory.lines(), vec!["got [1, 2]"]);
/// ```
#[derive(Clone, Copy)]
pub struct Dbg<T>(pub T);

impl<T: fmt::Debug> Display for Dbg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
