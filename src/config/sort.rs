// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

use clap::App;
use logger::*;

use std::ffi::OsString;

#[derive(Clone, Debug)]
pub struct SortConfig {
    base: u64,
    print_output: bool,
    serial_threshold: usize,
    threads: usize,
    logging: Level,
}

impl Default for SortConfig {
    fn default() -> SortConfig {
        SortConfig {
            base: 2,
            print_output: false,
            serial_threshold: 300,
            threads: 4,
            logging: default_logging_level(),
        }
    }
}

impl SortConfig {
    /// parse command line options and return `SortConfig`
    pub fn new() -> SortConfig {
        Self::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_args<I, T>(args: I) -> Result<SortConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("radix-sort")
            .version(VERSION)
            .about("Serial and parallel LSD radix sort over integers read from stdin")
            .arg(
                Arg::with_name("base")
                    .short("b")
                    .long("base")
                    .value_name("BASE")
                    .help("Select the base for the radix sort")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("print-output")
                    .short("i")
                    .long("print-output")
                    .help("Prints the sorted list to stdout"),
            )
            .arg(
                Arg::with_name("serial-threshold")
                    .short("s")
                    .long("serial-threshold")
                    .value_name("COUNT")
                    .help("Sort serially if the input size is less than or equal to this value")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("threads")
                    .short("t")
                    .long("threads")
                    .value_name("COUNT")
                    .help("The number of worker threads for the parallel sort")
                    .takes_value(true),
            )
            .arg(verbose_arg())
            .get_matches_from_safe(args)?;

        let mut config = SortConfig::default();

        if let Some(base) = parse_arg(&matches, "base")? {
            config.base = base;
        }
        if let Some(threshold) = parse_arg(&matches, "serial-threshold")? {
            config.serial_threshold = threshold;
        }
        if let Some(threads) = parse_arg(&matches, "threads")? {
            config.threads = threads;
        }
        config.print_output = matches.is_present("print-output");
        config.logging = verbosity(&matches, config.logging);

        Ok(config)
    }

    /// radix used for each counting pass
    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn print_output(&self) -> bool {
        self.print_output
    }

    /// inputs up to this length are sorted on the calling thread
    pub fn serial_threshold(&self) -> usize {
        self.serial_threshold
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn print(&self) {
        info!("-----");
        info!(
            "Config: Base: {} Threads: {} Serial Threshold: {}",
            self.base, self.threads, self.serial_threshold
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SortConfig::from_args(vec!["radix-sort"]).unwrap();
        assert_eq!(config.base(), 2);
        assert_eq!(config.serial_threshold(), 300);
        assert_eq!(config.threads(), 4);
        assert!(!config.print_output());
        assert_eq!(config.logging(), Level::Info);
    }

    #[test]
    fn options() {
        let args = vec!["radix-sort", "-b", "16", "-i", "-s", "10", "--threads", "8", "-v"];
        let config = SortConfig::from_args(args).unwrap();
        assert_eq!(config.base(), 16);
        assert!(config.print_output());
        assert_eq!(config.serial_threshold(), 10);
        assert_eq!(config.threads(), 8);
        assert_eq!(config.logging(), Level::Debug);
    }

    #[test]
    fn malformed_number() {
        match SortConfig::from_args(vec!["radix-sort", "--base", "ten"]) {
            Err(ConfigError::InvalidValue { name, value }) => {
                assert_eq!(name, "base");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unknown_flag() {
        assert!(matches!(
            SortConfig::from_args(vec!["radix-sort", "--bogus"]),
            Err(ConfigError::Args(_))
        ));
    }
}
