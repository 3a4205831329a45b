// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use radix_perf::config::GeneratorConfig;
use radix_perf::{generate, Error, VERSION};

use logger::*;

use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    let config = GeneratorConfig::new();

    Logger::new()
        .label("input_generator")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    debug!("input-generator {}", VERSION);

    if let Err(e) = run(&config) {
        fatal!("{}", e);
    }
}

fn run(config: &GeneratorConfig) -> Result<(), Error> {
    let mut rng = generate::rng(config.seed());
    let file = File::create(config.output())?;
    let mut writer = BufWriter::new(file);
    generate::generate(&mut rng, config.count(), config.max(), &mut writer)?;
    writer.flush()?;

    info!(
        "Wrote {} values below {} to {}",
        config.count(),
        config.max(),
        config.output()
    );
    Ok(())
}
