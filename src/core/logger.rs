use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use once_cell::sync::OnceCell;
use log::{
    LevelFilter,
    Metadata,
    Record
};

use crate::{
    Error,
    core::Result,
};

static MY_LOGGER: OnceCell<MyLogger> = OnceCell::new();

struct MyLogger {
    file: Mutex<Option<File>>,
}

impl log::Log for MyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        let Ok(mut guard) = self.file.lock() else {
            println!("{}", line);
            return;
        };
        match guard.as_mut() {
            Some(file) => { _ = writeln!(file, "{}", line); },
            None => println!("{}", line),
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                _ = file.flush();
            }
        }
        _ = io::stdout().flush();
    }
}

/// Installs the process logger. Lines go to `file` when given, to stdout
/// otherwise. Calling it again only redirects the output and changes the level.
pub fn setup(level: LevelFilter, file: Option<&str>) -> Result<()> {
    let output = match file {
        Some(path) => Some(OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Io(format!("Opening log file {} error: {}", path, e)))?
        ),
        None => None,
    };

    let logger = MY_LOGGER.get_or_init(|| MyLogger {
        file: Mutex::new(None),
    });

    if let Ok(mut guard) = logger.file.lock() {
        *guard = output;
    }

    _ = log::set_logger(logger);
    log::set_max_level(level);
    Ok(())
}

pub fn teardown() {
    log::logger().flush();
    log::set_max_level(LevelFilter::Off);
}
