// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use radix_perf::config::DataConfig;
use radix_perf::{charts, input, Error, VERSION};

use logger::*;

use std::io;

fn main() {
    let config = DataConfig::new();

    Logger::new()
        .label("data_chart")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    debug!("data-chart {}", VERSION);

    if let Err(e) = run(&config) {
        fatal!("{}", e);
    }
}

fn run(config: &DataConfig) -> Result<(), Error> {
    let stdin = io::stdin();
    let data = input::read_plot_data(stdin.lock())?;
    debug!("Plotting {} values", data.len());

    let chart = charts::data_chart(&data, config.size());
    chart.render(config.output())?;
    info!("Saved chart to {}", config.output());
    Ok(())
}
