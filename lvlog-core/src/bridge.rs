use crate::{level::Level, logger::Logger};

/// Lets a [`Logger`] serve the `log` facade. Filtering stays with the
/// logger's own level so that it can change at runtime.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        Logger::log(self, Level::from(record.level()), &[record.args()]);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use crate::{Level, Logger, MemoryDestination, PlainFormatter};
    use log::Log;

    #[test]
    fn test_records_are_routed_through_the_logger() {
        let memory = MemoryDestination::new();
        let logger = Logger::new(memory.clone()).unwrap();
        logger.set_formatter(PlainFormatter);
        logger.set_level(Level::Warn);

        Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("disk at {}%", 93))
                .level(log::Level::Warn)
                .build(),
        );
        Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("ignored"))
                .level(log::Level::Info)
                .build(),
        );
        assert_eq!(memory.lines(), vec!["disk at 93%"]);

        let metadata = log::Metadata::builder().level(log::Level::Error).build();
        assert!(Log::enabled(&logger, &metadata));
        let metadata = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(!Log::enabled(&logger, &metadata));
    }
}
