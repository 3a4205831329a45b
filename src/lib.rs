// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Radix sort benchmarking: random input generation, serial and parallel LSD
//! radix sort, and bar charts of the results.

pub mod charts;
pub mod config;
mod error;
pub mod generate;
pub mod input;
pub mod sort;

pub use crate::error::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
