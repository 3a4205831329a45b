// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Run with `cargo run -p logger --example demo 2>/dev/null` to see that only
//! the program output reaches stdout.

use logger::*;

mod pipeline {
    use logger::*;

    pub fn stage(values: &[u64]) -> u64 {
        // shown as [demo::pipeline]
        debug!("summing {} values", values.len());
        trace!("values: {:?}", values);
        let sum = values.iter().sum();
        // shown as [demo]
        info!("stage complete");
        sum
    }
}

pub fn main() {
    Logger::new()
        .label("demo")
        .level(Level::Trace)
        .init()
        .expect("Failed to initialize logger");

    info!("logs go to stderr");
    let sum = pipeline::stage(&[3, 1, 2]);
    println!("{}", sum);

    warn!("about to fail");
    fatal!("exiting with status 1");
}
