use crate::error::LogError;

/// Receives failures that happen inside a log call.
///
/// Logging never fails for its caller, so this is the only place such
/// errors are visible. The sink is invoked after the logger's lock has been
/// released, which makes it safe to log from a sink through another logger.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &LogError);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&LogError) + Send + Sync,
{
    fn report(&self, error: &LogError) {
        self(error)
    }
}

/// Prints the failure to stderr. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn report(&self, error: &LogError) {
        eprintln!("Failed to write log message: {error}");
    }
}

/// Drops every failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl DiagnosticSink for SilentDiagnostics {
    fn report(&self, _error: &LogError) {}
}
