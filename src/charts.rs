// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Chart definitions for the two plotting binaries.

use crate::config::PerfConfig;
use crate::input::labels;

use barchart::{parse_colour, BarChart, ChartError, Series};

/// matplotlib's default bar width
pub const DATA_BAR_WIDTH: f64 = 0.8;

/// Grouped bars of each configured series across the configured categories.
pub fn perf_chart(config: &PerfConfig) -> Result<BarChart, ChartError> {
    let mut chart = BarChart::new(config.categories());
    chart
        .caption(config.title())
        .x_desc(config.x_desc())
        .y_desc(config.y_desc())
        .size(config.size())
        .bar_width(config.bar_width())
        .edge(config.edge().map(parse_colour).transpose()?);

    for series in config.series() {
        let mut bars = Series::new(series.name(), series.values().to_vec());
        if let Some(colour) = series.colour() {
            bars = bars.colour(parse_colour(colour)?);
        }
        chart.add_series(bars);
    }

    Ok(chart)
}

/// One bar per value, labelled with the value itself, without axes.
pub fn data_chart(data: &[i64], size: (u32, u32)) -> BarChart {
    let mut chart = BarChart::new(labels(data));
    chart
        .size(size)
        .bar_width(DATA_BAR_WIDTH)
        .axes(false)
        .legend(false)
        .add_series(Series::new("", data.iter().map(|&v| v as f64).collect()));
    chart
}
