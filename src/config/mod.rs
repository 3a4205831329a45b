// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Command line and config file handling for each binary.

mod data;
mod generator;
mod perf;
mod sort;

pub use self::data::DataConfig;
pub use self::generator::GeneratorConfig;
pub use self::perf::{PerfConfig, SeriesConfig};
pub use self::sort::SortConfig;

use clap::{Arg, ArgMatches};
use logger::Level;
use serde_derive::*;
use thiserror::Error;

use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Args(#[from] clap::Error),
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl ConfigError {
    /// Prints the error and terminates. Requests for `--help` or `--version`
    /// exit with status 0.
    pub fn exit(self) -> ! {
        match self {
            ConfigError::Args(e) => e.exit(),
            other => {
                eprintln!("ERROR: {}", other);
                std::process::exit(1);
            }
        }
    }
}

fn verbose_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("Increase verbosity by one level. Can be used more than once")
        .multiple(true)
}

/// `-v` raises the level to debug, `-vv` and beyond to trace
fn verbosity(matches: &ArgMatches, default: Level) -> Level {
    match matches.occurrences_of("verbose") {
        0 => default,
        1 => Level::Debug,
        _ => Level::Trace,
    }
}

/// a helper function to parse an argument by name from `ArgMatches`
fn parse_arg<T: FromStr>(matches: &ArgMatches, key: &'static str) -> Result<Option<T>, ConfigError> {
    matches
        .value_of(key)
        .map(|value| {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                name: key,
                value: value.to_owned(),
            })
        })
        .transpose()
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "Level")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> Level {
    Level::Info
}
