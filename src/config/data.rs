// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

use clap::App;
use logger::*;

use std::ffi::OsString;

#[derive(Clone, Debug)]
pub struct DataConfig {
    output: String,
    width: u32,
    height: u32,
    logging: Level,
}

impl Default for DataConfig {
    fn default() -> DataConfig {
        DataConfig {
            output: "data.out.png".to_owned(),
            width: 640,
            height: 480,
            logging: default_logging_level(),
        }
    }
}

impl DataConfig {
    /// parse command line options and return `DataConfig`
    pub fn new() -> DataConfig {
        Self::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_args<I, T>(args: I) -> Result<DataConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("data-chart")
            .version(VERSION)
            .about("Plots the values on the third line of stdin as bars")
            .arg(
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .value_name("FILE")
                    .help("Path of the PNG to write")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .value_name("PIXELS")
                    .help("Image width")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .value_name("PIXELS")
                    .help("Image height")
                    .takes_value(true),
            )
            .arg(verbose_arg())
            .get_matches_from_safe(args)?;

        let mut config = DataConfig::default();
        if let Some(output) = matches.value_of("output") {
            config.output = output.to_owned();
        }
        if let Some(width) = parse_arg(&matches, "width")? {
            config.width = width;
        }
        if let Some(height) = parse_arg(&matches, "height")? {
            config.height = height;
        }
        config.logging = verbosity(&matches, config.logging);

        Ok(config)
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn logging(&self) -> Level {
        self.logging
    }
}
