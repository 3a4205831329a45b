// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

use clap::App;
use logger::*;

use std::ffi::OsString;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    count: u64,
    max: u64,
    output: String,
    seed: Option<u64>,
    logging: Level,
}

impl GeneratorConfig {
    /// parse command line options and return `GeneratorConfig`
    pub fn new() -> GeneratorConfig {
        Self::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_args<I, T>(args: I) -> Result<GeneratorConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("input-generator")
            .version(VERSION)
            .about("Writes random integers in the format read by radix-sort")
            .arg(
                Arg::with_name("count")
                    .value_name("COUNT")
                    .help("The amount of random numbers")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::with_name("max")
                    .value_name("MAX")
                    .help("Exclusive upper bound of the generated values")
                    .required(true)
                    .index(2),
            )
            .arg(
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .value_name("FILE")
                    .help("File to write, data.in by default")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("seed")
                    .long("seed")
                    .value_name("INTEGER")
                    .help("Seed for reproducible output")
                    .takes_value(true),
            )
            .arg(verbose_arg())
            .get_matches_from_safe(args)?;

        let count = parse_arg(&matches, "count")?.unwrap_or(0);
        let max = parse_arg(&matches, "max")?.unwrap_or(0);
        if max == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max",
                value: "0".to_owned(),
            });
        }

        Ok(GeneratorConfig {
            count,
            max,
            output: matches.value_of("output").unwrap_or("data.in").to_owned(),
            seed: parse_arg(&matches, "seed")?,
            logging: verbosity(&matches, default_logging_level()),
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn logging(&self) -> Level {
        self.logging
    }
}
