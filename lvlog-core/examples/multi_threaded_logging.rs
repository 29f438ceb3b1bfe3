use std::sync::Arc;

use lvlog_core::{FileDestination, Level, Logger, PlainFormatter};

fn main() {
    // main thread logs to stdout
    let logger = Arc::new(Logger::default());
    logger.set_level(Level::Trace);
    logger.info(&[&"Hello, world!"]);
    // threaded tasks share the same logger, each line is written in one piece
    let handles: Vec<_> = (0..5)
        .map(|i| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for j in 0..3 {
                    logger.warn(&[&"thread", &i, &"message", &j]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    // then everything moves to a file
    logger.set_formatter(PlainFormatter);
    if let Err(error) = logger.set_destination(FileDestination::new("/tmp/lvlog_demo.log")) {
        eprintln!("unable to switch to the log file: {error}");
        return;
    }
    logger.error(&[&"written to", &"/tmp/lvlog_demo.log"]);
    println!(
        "last line of /tmp/lvlog_demo.log is:\n\t{}",
        std::fs::read_to_string("/tmp/lvlog_demo.log")
            .unwrap()
            .trim_end()
            .lines()
            .last()
            .unwrap()
    );
}
