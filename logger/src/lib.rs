// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small leveled logger for the `log` facade.
//!
//! Records are written to stderr as
//! `YYYY-MM-DD HH:MM:SS.mmm LEVEL [label] message` so that stdout remains free
//! for program output.

pub use log;
pub use log::{debug, error, info, trace, warn, Level, LevelFilter, SetLoggerError};

use log::{Metadata, Record};

use std::fmt;
use std::io::Write;

/// Logs at error level and terminates the process with exit status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        $crate::log::logger().flush();
        std::process::exit(1);
    }};
}

pub struct Logger {
    label: Option<&'static str>,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Logger {
        Logger {
            label: None,
            level: Level::Info,
        }
    }

    /// Name shown in brackets for records below debug level. Debug and trace
    /// records show their module path instead.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Installs this logger as the global `log` backend.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(filter))
    }

    fn format(&self, level: Level, target: &str, args: &fmt::Arguments) -> String {
        let target = if level >= Level::Debug {
            target
        } else {
            self.label.unwrap_or(target)
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            target,
            args
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format(record.level(), record.target(), record.args());
            let stderr = std::io::stderr();
            let mut handle = stderr.lock();
            let _ = writeln!(handle, "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
