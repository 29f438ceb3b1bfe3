use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;

use crate::{error::FormatError, level::Level, message::Message};

/// Turns an accepted [`Message`] into the line handed to the destination.
///
/// Formatters carry no lifecycle; the logger swaps them freely.
pub trait Formatter: Send + Sync {
    fn format(&self, message: &Message) -> Result<String, FormatError>;
}

/// ISO-8601, UTC, second precision: `2024-01-02T03:04:05Z`.
pub fn iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Outputs the message text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, message: &Message) -> Result<String, FormatError> {
        Ok(message.value().to_string())
    }
}

/// `<timestamp> [<level>] <text>`. The default formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaFormatter;

impl Formatter for MetaFormatter {
    fn format(&self, message: &Message) -> Result<String, FormatError> {
        Ok(format!(
            "{} [{}] {}",
            iso8601(message.sent_at()),
            message.level(),
            message.value()
        ))
    }
}

/// Same layout as [`MetaFormatter`], with the level name colored for terminals.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColoredFormatter;

impl Formatter for ColoredFormatter {
    fn format(&self, message: &Message) -> Result<String, FormatError> {
        let name = message.level().as_str();
        let level = match message.level() {
            Level::Error => name.red(),
            Level::Warn => name.yellow(),
            Level::Info => name.green(),
            Level::Debug => name.blue(),
            Level::Trace => name.purple(),
        };
        Ok(format!(
            "{} [{level}] {}",
            iso8601(message.sent_at()),
            message.value()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hello() -> Message {
        let sent_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        Message::new("hello".into(), sent_at, Level::Info)
    }

    #[test]
    fn test_meta_formatter() {
        assert_eq!(
            MetaFormatter.format(&hello()).unwrap(),
            "2024-01-02T03:04:05Z [info] hello"
        );
    }

    #[test]
    fn test_plain_formatter() {
        assert_eq!(PlainFormatter.format(&hello()).unwrap(), "hello");
    }

    #[test]
    fn test_meta_formatter_drops_subseconds() {
        let sent_at = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap()
            .checked_add_signed(chrono::TimeDelta::milliseconds(789))
            .unwrap();
        let message = Message::new("late".into(), sent_at, Level::Error);
        assert_eq!(
            MetaFormatter.format(&message).unwrap(),
            "2024-01-02T03:04:05Z [error] late"
        );
    }

    #[test]
    fn test_colored_formatter_layout() {
        let line = ColoredFormatter.format(&hello()).unwrap();
        assert!(line.starts_with("2024-01-02T03:04:05Z ["));
        assert!(line.contains("info"));
        assert!(line.ends_with("] hello"));
    }
}
