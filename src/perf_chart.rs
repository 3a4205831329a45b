// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use radix_perf::config::PerfConfig;
use radix_perf::{charts, Error, VERSION};

use logger::*;

fn main() {
    let config = PerfConfig::new();

    Logger::new()
        .label("perf_chart")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("perf-chart {} initializing...", VERSION);
    config.print();

    if let Err(e) = run(&config) {
        fatal!("{}", e);
    }
}

fn run(config: &PerfConfig) -> Result<(), Error> {
    let chart = charts::perf_chart(config)?;
    chart.render(config.output())?;
    info!("Saved chart to {}", config.output());
    Ok(())
}
