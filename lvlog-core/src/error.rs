use std::{fmt, io};

/// A formatter could not render a message.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A `Display` implementation reported an error.
    #[error("formatting failed")]
    Fmt(#[from] fmt::Error),
    #[error("{0}")]
    Custom(String),
}

impl FormatError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// A destination failed or refused to write a line.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("destination is not open")]
    NotOpen,
    #[error("{0}")]
    Rejected(String),
}

impl WriteError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// A destination could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Rejected(String),
}

impl OpenError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// A destination could not be closed cleanly.
#[derive(Debug, thiserror::Error)]
pub enum CloseError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Rejected(String),
}

impl CloseError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Failure inside [`Logger::log`](crate::Logger::log).
///
/// These never reach the caller of `log`; they go to the logger's
/// [`DiagnosticSink`](crate::DiagnosticSink) and are then dropped.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("unable to format log message: {0}")]
    Format(#[from] FormatError),
    #[error("unable to write log message to {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: WriteError,
    },
}

impl LogError {
    /// The step of the log call that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            LogError::Format(_) => "format",
            LogError::Write { .. } => "write",
        }
    }
}

/// Outcome of a failed [`Logger::set_destination`](crate::Logger::set_destination).
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    /// The new destination did not open. The previous one is still active.
    #[error("unable to open new destination, previous destination kept: {0}")]
    Open(#[source] OpenError),
    /// The previous destination did not close. The new one is active anyway.
    #[error("previous destination failed to close, new destination installed: {0}")]
    Close(#[source] CloseError),
}

impl SwapError {
    /// Whether the new destination became active despite the error.
    pub fn is_installed(&self) -> bool {
        matches!(self, SwapError::Close(_))
    }
}
