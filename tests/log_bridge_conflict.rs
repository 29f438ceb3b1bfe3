use lvlog::{
    InitError, Level, Logger, MemoryDestination, NullDestination, PlainFormatter, logger_config,
};

// Single test: the `log` facade accepts one logger per process.
#[test]
fn test_bridge_failure_still_installs_global() {
    let other: &'static Logger = Box::leak(Box::new(Logger::new(NullDestination).unwrap()));
    log::set_logger(other).unwrap();

    let memory = MemoryDestination::new();
    let result = logger_config()
        .with_destination(memory.clone())
        .with_formatter(PlainFormatter)
        .with_level(Level::Info)
        .with_log_bridge()
        .init_global();
    assert!(matches!(result, Err(InitError::LogBridge(_))));

    // the global logger is in place regardless
    assert_eq!(lvlog::global().destination_name(), "memory");
    lvlog::info!("still", "logging");
    assert_eq!(memory.lines(), vec!["still logging"]);
}
