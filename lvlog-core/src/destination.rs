use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::{CloseError, OpenError, WriteError};

/// Where formatted lines end up.
///
/// The logger calls `open` once when the destination becomes active,
/// `write` once per accepted message and `close` once when it is replaced.
/// All three run while the logger's lock is held.
pub trait Destination: Send {
    fn open(&mut self) -> Result<(), OpenError> {
        Ok(())
    }

    fn write(&mut self, line: &str) -> Result<(), WriteError>;

    fn close(&mut self) -> Result<(), CloseError> {
        Ok(())
    }

    /// Short label identifying the destination.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Writes each line followed by a newline to stdout.
#[derive(Debug, Default)]
pub struct ConsoleDestination;

impl Destination for ConsoleDestination {
    fn write(&mut self, line: &str) -> Result<(), WriteError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Appends lines to a file. The file is created on `open` if missing.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FileDestination {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl Destination for FileDestination {
    fn open(&mut self) -> Result<(), OpenError> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    fn write(&mut self, line: &str) -> Result<(), WriteError> {
        let file = self.file.as_mut().ok_or(WriteError::NotOpen)?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), CloseError> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullDestination;

impl Destination for NullDestination {
    fn write(&mut self, _line: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Keeps written lines in memory. Clones share the same buffer, so a handle
/// kept aside still sees lines written after the destination was installed.
#[derive(Debug, Default, Clone)]
pub struct MemoryDestination {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Destination for MemoryDestination {
    fn write(&mut self, line: &str) -> Result<(), WriteError> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[test]
fn test_file_destination_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "existing\n").unwrap();

    let mut file = FileDestination::new(&path);
    assert!(matches!(file.write("too early"), Err(WriteError::NotOpen)));
    file.open().unwrap();
    assert!(file.is_open());
    file.write("Hello, world!").unwrap();
    // each write is flushed, nothing waits for close
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "existing\nHello, world!\n"
    );
    file.write("rust is awesome !").unwrap();
    file.close().unwrap();
    assert!(!file.is_open());
    assert!(matches!(file.write("too late"), Err(WriteError::NotOpen)));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "existing\nHello, world!\nrust is awesome !\n"
    );
}

#[test]
fn test_file_destination_open_fails_in_missing_folder() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = FileDestination::new(dir.path().join("missing").join("app.log"));
    assert!(matches!(file.open(), Err(OpenError::Io(_))));
}

#[test]
fn test_memory_destination_shares_buffer() {
    let memory = MemoryDestination::new();
    let mut installed = memory.clone();
    installed.write("one").unwrap();
    installed.write("two").unwrap();
    assert_eq!(memory.lines(), vec!["one", "two"]);
    memory.clear();
    assert!(installed.lines().is_empty());
}

#[test]
fn test_console_destination() {
    let mut console = ConsoleDestination;
    console.open().unwrap();
    console.write("Hello, world!").unwrap();
    console.close().unwrap();
    assert_eq!(console.name(), "console");
}
