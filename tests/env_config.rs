use lvlog::{
    FormatterKind, InitError, LVLOG_CONFIG, Level, LevelSetting, MemoryDestination, logger_config,
};

// Single test: the environment is read once per process.
#[test]
fn test_global_falls_back_per_variable() {
    // SAFETY: set before any other thread of this binary exists or reads it.
    unsafe {
        std::env::set_var("LVLOG_LEVEL", "warn");
        std::env::set_var("LVLOG_FORMAT", "json");
    }
    assert_eq!(*LVLOG_CONFIG.LEVEL, LevelSetting::Fixed(Level::Warn));
    assert_eq!(*LVLOG_CONFIG.FORMAT, FormatterKind::Meta);

    let builder_logger = logger_config().no_stdout().build().unwrap();
    assert_eq!(builder_logger.level(), Level::Warn);

    // no init_global: the first use builds the default from the environment
    let logger = lvlog::global();
    assert_eq!(logger.level(), Level::Warn);
    assert_eq!(logger.destination_name(), "console");

    let memory = MemoryDestination::new();
    logger.set_destination(memory.clone()).unwrap();
    lvlog::info!("filtered");
    lvlog::warn!("kept");
    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("Z [warn] kept"), "{}", lines[0]);

    assert!(matches!(
        logger_config().init_global(),
        Err(InitError::AlreadyInitialized)
    ));
}
