// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use radix_perf::config::SortConfig;
use radix_perf::{input, sort, Error, VERSION};

use logger::*;

use std::io::{self, BufWriter, Write};
use std::time::Instant;

fn main() {
    let config = SortConfig::new();

    Logger::new()
        .label("radix_sort")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("radix-sort {} initializing...", VERSION);
    config.print();

    if let Err(e) = run(&config) {
        fatal!("{}", e);
    }
}

fn run(config: &SortConfig) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut values = input::read_sort_input(stdin.lock())?;
    info!("Read {} values", values.len());

    let start = Instant::now();
    let strategy = sort::execute(
        &mut values,
        config.base(),
        config.threads(),
        config.serial_threshold(),
    )?;
    let elapsed = start.elapsed();
    info!("Sorted in {:?}", elapsed);

    let sorted = if config.print_output() {
        Some(values.as_slice())
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    sort::report(&mut out, strategy, elapsed, sorted)?;
    out.flush()?;

    Ok(())
}
