// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::ConfigError;
use crate::input::InputError;
use crate::sort::SortError;

use barchart::ChartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Sort(#[from] SortError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
