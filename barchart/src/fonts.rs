// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ChartError;

use plotters::style::{register_font, FontStyle};

/// font family used for every piece of text on a chart
pub const FAMILY: &str = "sans-serif";

/// Registers the bundled DejaVu face under `FAMILY` so text rendering does not
/// depend on fonts installed on the host. The same face serves the bold style.
pub fn register() -> Result<(), ChartError> {
    let font: &'static [u8] = dejavu::sans_mono::regular();
    for style in &[FontStyle::Normal, FontStyle::Bold] {
        register_font(FAMILY, *style, font).map_err(|_| ChartError::Font)?;
    }
    Ok(())
}
