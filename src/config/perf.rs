// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

use clap::App;
use logger::*;

use std::ffi::OsString;

/// Grouped bar chart of benchmark results, one series per implementation.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerfConfig {
    #[serde(default)]
    general: General,
    categories: Vec<Category>,
    series: Vec<SeriesConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct General {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_x_desc")]
    x_desc: String,
    #[serde(default = "default_y_desc")]
    y_desc: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_bar_width")]
    bar_width: f64,
    #[serde(default = "default_edge")]
    edge: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl Default for General {
    fn default() -> General {
        General {
            title: default_title(),
            x_desc: default_x_desc(),
            y_desc: default_y_desc(),
            output: default_output(),
            bar_width: default_bar_width(),
            edge: default_edge(),
            width: default_width(),
            height: default_height(),
            logging: default_logging_level(),
        }
    }
}

fn default_title() -> String {
    "Execution Time by Input Size (nprocs=4)".to_owned()
}

fn default_x_desc() -> String {
    "Input Size (integer count)".to_owned()
}

fn default_y_desc() -> String {
    "Time Elapsed (seconds)".to_owned()
}

fn default_output() -> String {
    "results.out.png".to_owned()
}

fn default_bar_width() -> f64 {
    0.25
}

fn default_edge() -> String {
    "grey".to_owned()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}

/// Category labels may be written as strings or bare numbers.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Category {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Category {
    fn label(&self) -> String {
        match self {
            Category::Text(text) => text.clone(),
            Category::Integer(value) => value.to_string(),
            Category::Float(value) => value.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    name: String,
    colour: Option<String>,
    values: Vec<f64>,
}

impl SeriesConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colour(&self) -> Option<&str> {
        self.colour.as_deref()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for PerfConfig {
    /// Radix sort timings measured with 4 processes.
    fn default() -> PerfConfig {
        let input_size = [100_000, 500_000, 1_000_000];
        let serial = vec![0.099610, 0.553899, 14.190338];
        let parallel = vec![0.147379, 0.914620, 4.430356];

        PerfConfig {
            general: Default::default(),
            categories: input_size.iter().map(|&v| Category::Integer(v)).collect(),
            series: vec![
                SeriesConfig {
                    name: "Serial".to_owned(),
                    colour: Some("r".to_owned()),
                    values: serial,
                },
                SeriesConfig {
                    name: "Parallel".to_owned(),
                    colour: Some("g".to_owned()),
                    values: parallel,
                },
            ],
        }
    }
}

impl PerfConfig {
    /// parse command line options and return `PerfConfig`
    pub fn new() -> PerfConfig {
        Self::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_args<I, T>(args: I) -> Result<PerfConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("perf-chart")
            .version(VERSION)
            .about("Plots benchmark timings as a grouped bar chart")
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .value_name("FILE")
                    .help("TOML file with categories and series to plot")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .short("o")
                    .value_name("FILE")
                    .help("Path of the PNG to write")
                    .takes_value(true),
            )
            .arg(verbose_arg())
            .get_matches_from_safe(args)?;

        let mut config = if let Some(file) = matches.value_of("config") {
            PerfConfig::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(output) = matches.value_of("output") {
            config.general.output = output.to_owned();
        }

        config.general.logging = verbosity(&matches, config.general.logging);

        Ok(config)
    }

    pub fn load_from_file(file: &str) -> Result<PerfConfig, ConfigError> {
        let content = std::fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_owned(),
            source,
        })?;
        Self::load_from_str(file, &content)
    }

    /// `path` only names the source in error messages
    pub fn load_from_str(path: &str, content: &str) -> Result<PerfConfig, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn title(&self) -> &str {
        &self.general.title
    }

    pub fn x_desc(&self) -> &str {
        &self.general.x_desc
    }

    pub fn y_desc(&self) -> &str {
        &self.general.y_desc
    }

    pub fn output(&self) -> &str {
        &self.general.output
    }

    pub fn bar_width(&self) -> f64 {
        self.general.bar_width
    }

    /// bar outline colour, `None` when set to "none"
    pub fn edge(&self) -> Option<&str> {
        match self.general.edge.as_str() {
            "none" | "" => None,
            edge => Some(edge),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.general.width, self.general.height)
    }

    pub fn logging(&self) -> Level {
        self.general.logging
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label()).collect()
    }

    pub fn series(&self) -> &[SeriesConfig] {
        &self.series
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Title: {}", self.title());
        info!(
            "Config: Output: {} Size: {}x{}",
            self.output(),
            self.general.width,
            self.general.height
        );
        info!("Config: Categories: {}", self.categories().join(", "));
        for series in &self.series {
            info!(
                "Config: Series: {} Values: {:?}",
                series.name(),
                series.values()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_results_line_up() {
        let config = PerfConfig::default();
        let categories = config.categories();
        assert_eq!(categories, vec!["100000", "500000", "1000000"]);
        assert_eq!(config.series().len(), 2);
        for series in config.series() {
            assert_eq!(series.values().len(), categories.len());
        }
        assert_eq!(config.series()[0].name(), "Serial");
        assert_eq!(config.series()[1].name(), "Parallel");
        assert_eq!(config.bar_width(), 0.25);
        assert_eq!(config.output(), "results.out.png");
        assert_eq!(config.edge(), Some("grey"));
    }

    #[test]
    fn load_toml() {
        let content = r#"
categories = [10, "twenty", 30.5]

[general]
title = "Custom"
edge = "none"
logging = "debug"

[[series]]
name = "only"
values = [1.0, 2.0, 3.0]
"#;
        let config = PerfConfig::load_from_str("test.toml", content).unwrap();
        assert_eq!(config.title(), "Custom");
        assert_eq!(config.x_desc(), "Input Size (integer count)");
        assert_eq!(config.categories(), vec!["10", "twenty", "30.5"]);
        assert_eq!(config.edge(), None);
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.series()[0].colour(), None);
        assert_eq!(config.size(), (1280, 960));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let content = r#"
categories = ["a"]

[general]
colour = "red"

[[series]]
name = "s"
values = [1.0]
"#;
        match PerfConfig::load_from_str("bad.toml", content) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, "bad.toml"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn command_line_overrides() {
        let config = PerfConfig::from_args(vec!["perf-chart", "-o", "out.png", "-vv"]).unwrap();
        assert_eq!(config.output(), "out.png");
        assert_eq!(config.logging(), Level::Trace);

        let config = PerfConfig::from_args(vec!["perf-chart"]).unwrap();
        assert_eq!(config.logging(), Level::Info);
    }

    #[test]
    fn missing_config_file() {
        match PerfConfig::from_args(vec!["perf-chart", "--config", "/nonexistent/perf.toml"]) {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, "/nonexistent/perf.toml"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
