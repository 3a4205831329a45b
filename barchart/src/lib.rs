// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bar charts over categorical data, rendered to PNG with plotters.
//!
//! Several series can be drawn side by side per category (a grouped bar
//! chart); see [`GroupedLayout`] for how the bars are placed.

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use thiserror::Error;

use logger::*;

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

mod fonts;
mod layout;

pub use layout::*;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            (($colour & 0x0000FF) >> 0) as u8,
        )
    };
}

/// colours for series that do not pick one, in order
const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
];

/// fraction of the value span left free above (and below) the bars when axes
/// are drawn
const VALUE_MARGIN: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart has no categories")]
    NoCategories,
    #[error("chart has no series")]
    NoSeries,
    #[error("series '{series}' has {found} values but there are {expected} categories")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },
    #[error("series '{series}' contains a value that is not finite")]
    NonFiniteValue { series: String },
    #[error("bar width must be positive and finite, got {0}")]
    InvalidBarWidth(f64),
    #[error("image size must be non-zero, got {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("unknown colour: {0}")]
    UnknownColour(String),
    #[error("failed to load font")]
    Font,
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn draw_error<E: Display>(error: E) -> ChartError {
    ChartError::Draw(error.to_string())
}

/// Parses a colour given as a single-letter code (`r`, `g`, `b`, `c`, `m`,
/// `y`, `k`, `w`), a basic name, or `#rrggbb`.
pub fn parse_colour(name: &str) -> Result<RGBColor, ChartError> {
    let colour = match name.trim().to_ascii_lowercase().as_str() {
        "r" | "red" => hexcolour!(0xFF0000),
        "g" | "green" => hexcolour!(0x008000),
        "b" | "blue" => hexcolour!(0x0000FF),
        "c" | "cyan" => hexcolour!(0x00BFBF),
        "m" | "magenta" => hexcolour!(0xBF00BF),
        "y" | "yellow" => hexcolour!(0xBFBF00),
        "k" | "black" => hexcolour!(0x000000),
        "w" | "white" => hexcolour!(0xFFFFFF),
        "grey" | "gray" => hexcolour!(0x808080),
        other => {
            let hex = other
                .strip_prefix('#')
                .filter(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .ok_or_else(|| ChartError::UnknownColour(name.to_owned()))?;
            RGBColor((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
        }
    };
    Ok(colour)
}

/// One value per category, drawn as bars of a single colour.
#[derive(Clone, Debug)]
pub struct Series {
    label: String,
    colour: Option<RGBColor>,
    values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl AsRef<str>, values: Vec<f64>) -> Self {
        Self {
            label: label.as_ref().to_owned(),
            colour: None,
            values,
        }
    }

    pub fn colour(mut self, colour: RGBColor) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

pub struct BarChart {
    caption: String,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),
    bar_width: f64,
    edge: Option<RGBColor>,
    axes: bool,
    legend: bool,

    categories: Vec<String>,
    series: Vec<Series>,
}

impl BarChart {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            caption: String::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            size: (1080, 720),
            bar_width: 0.8,
            edge: None,
            axes: true,
            legend: true,

            categories,
            series: Vec::new(),
        }
    }

    pub fn caption(&mut self, caption: impl AsRef<str>) -> &mut Self {
        self.caption = caption.as_ref().to_owned();
        self
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn bar_width(&mut self, width: f64) -> &mut Self {
        self.bar_width = width;
        self
    }

    /// Outline colour for every bar, `None` for no outline.
    pub fn edge(&mut self, colour: Option<RGBColor>) -> &mut Self {
        self.edge = colour;
        self
    }

    /// When disabled the bars fill the whole image: no caption, axes, labels
    /// or legend, and the value range is fitted tightly to the data.
    pub fn axes(&mut self, visible: bool) -> &mut Self {
        self.axes = visible;
        self
    }

    pub fn legend(&mut self, visible: bool) -> &mut Self {
        self.legend = visible;
        self
    }

    pub fn add_series(&mut self, series: Series) -> &mut Self {
        self.series.push(series);
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn layout(&self) -> GroupedLayout {
        GroupedLayout::new(self.categories.len(), self.series.len(), self.bar_width)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.categories.is_empty() {
            return Err(ChartError::NoCategories);
        }
        if self.series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if !(self.bar_width.is_finite() && self.bar_width > 0.0) {
            return Err(ChartError::InvalidBarWidth(self.bar_width));
        }
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ChartError::InvalidSize(self.size.0, self.size.1));
        }
        for series in &self.series {
            if series.values.len() != self.categories.len() {
                return Err(ChartError::LengthMismatch {
                    series: series.label.clone(),
                    expected: self.categories.len(),
                    found: series.values.len(),
                });
            }
            if series.values.iter().any(|v| !v.is_finite()) {
                return Err(ChartError::NonFiniteValue {
                    series: series.label.clone(),
                });
            }
        }
        Ok(())
    }

    /// The y axis range. Bars grow from zero, so zero is always included.
    pub fn value_range(&self) -> Range<f64> {
        let values = self.series.iter().flat_map(|s| s.values.iter().copied());
        let (low, high) = values.fold((0.0_f64, 0.0_f64), |(low, high), v| {
            (low.min(v), high.max(v))
        });
        if high - low <= 0.0 {
            return 0.0..1.0;
        }
        if !self.axes {
            return low..high;
        }
        let pad = (high - low) * VALUE_MARGIN;
        let low = if low < 0.0 { low - pad } else { low };
        let high = if high > 0.0 { high + pad } else { high };
        low..high
    }

    /// Draws the chart and writes it as a PNG to `path`.
    pub fn render(&self, path: impl AsRef<Path>) -> Result<(), ChartError> {
        self.validate()?;
        fonts::register()?;

        let path = path.as_ref();
        debug!(
            "rendering {} series over {} categories to {} ({}x{})",
            self.series.len(),
            self.categories.len(),
            path.display(),
            self.size.0,
            self.size.1
        );

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let layout = self.layout();
        if self.axes {
            self.draw_with_axes(&root, &layout)?;
        } else {
            let mut chart = ChartBuilder::on(&root)
                .build_cartesian_2d(layout.coord(layout.extent()), self.value_range())
                .map_err(draw_error)?;
            self.draw_bars(&mut chart, &layout)?;
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }

    fn draw_with_axes<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        layout: &GroupedLayout,
    ) -> Result<(), ChartError> {
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 100)
            .set_label_area_size(LabelAreaPosition::Bottom, 80);
        if !self.caption.is_empty() {
            builder.caption(
                &self.caption,
                (fonts::FAMILY, 34).into_font().style(FontStyle::Bold),
            );
        }
        let mut chart = builder
            .build_cartesian_2d(layout.coord(layout.padded_extent()), self.value_range())
            .map_err(draw_error)?;

        let categories = &self.categories;
        let formatter = |x: &f64| {
            layout
                .category_at(*x)
                .map(|i| categories[i].clone())
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(categories.len())
            .x_label_formatter(&formatter)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style((fonts::FAMILY, 30).into_font().style(FontStyle::Bold))
            .label_style((fonts::FAMILY, 20).into_font())
            .draw()
            .map_err(draw_error)?;

        self.draw_bars(&mut chart, layout)?;

        if self.legend && self.series.iter().any(|s| !s.label.is_empty()) {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font((fonts::FAMILY, 20).into_font())
                .background_style(WHITE.filled())
                .border_style(&BLACK)
                .draw()
                .map_err(draw_error)?;
        }

        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<'_, DB, Cartesian2d<GroupCoord, RangedCoordf64>>,
        layout: &GroupedLayout,
    ) -> Result<(), ChartError> {
        let half = layout.bar_width() / 2.0;

        for (i, series) in self.series.iter().enumerate() {
            let colour = series.colour.unwrap_or(COLOURS[i % COLOURS.len()]);
            let offsets = layout.offsets(i);
            trace!("series '{}' offsets: {:?}", series.label, offsets);

            let bars = offsets
                .iter()
                .zip(series.values.iter())
                .map(|(&x, &v)| Rectangle::new([(x - half, 0.0), (x + half, v)], colour.filled()));
            let annotation = chart.draw_series(bars).map_err(draw_error)?;
            if !series.label.is_empty() {
                annotation
                    .label(series.label.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], colour.filled()));
            }

            if let Some(edge) = self.edge {
                let outlines = offsets.iter().zip(series.values.iter()).map(|(&x, &v)| {
                    Rectangle::new([(x - half, 0.0), (x + half, v)], edge.stroke_width(1))
                });
                chart.draw_series(outlines).map_err(draw_error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> BarChart {
        let mut chart = BarChart::new(vec!["a".to_owned(), "b".to_owned()]);
        chart.add_series(Series::new("one", vec![1.0, 2.0]));
        chart
    }

    #[test]
    fn colours() {
        assert_eq!(parse_colour("r").unwrap(), RGBColor(255, 0, 0));
        assert_eq!(parse_colour("Green").unwrap(), RGBColor(0, 128, 0));
        assert_eq!(parse_colour("grey").unwrap(), parse_colour("gray").unwrap());
        assert_eq!(parse_colour("#102030").unwrap(), RGBColor(0x10, 0x20, 0x30));
        assert!(matches!(parse_colour("#12345"), Err(ChartError::UnknownColour(_))));
        assert!(matches!(parse_colour("#+12345"), Err(ChartError::UnknownColour(_))));
        assert!(matches!(parse_colour("#-12345"), Err(ChartError::UnknownColour(_))));
        assert!(matches!(parse_colour("teal"), Err(ChartError::UnknownColour(_))));
    }

    #[test]
    fn validate_lengths() {
        let mut chart = chart();
        assert!(chart.validate().is_ok());

        chart.add_series(Series::new("two", vec![1.0]));
        match chart.validate() {
            Err(ChartError::LengthMismatch {
                series,
                expected,
                found,
            }) => {
                assert_eq!(series, "two");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_degenerate_charts() {
        let empty = BarChart::new(Vec::new());
        assert!(matches!(empty.validate(), Err(ChartError::NoCategories)));

        let no_series = BarChart::new(vec!["a".to_owned()]);
        assert!(matches!(no_series.validate(), Err(ChartError::NoSeries)));

        let mut chart = chart();
        chart.bar_width(0.0);
        assert!(matches!(chart.validate(), Err(ChartError::InvalidBarWidth(_))));

        let mut chart = self::chart();
        chart.size((0, 10));
        assert!(matches!(chart.validate(), Err(ChartError::InvalidSize(0, 10))));

        let mut chart = BarChart::new(vec!["a".to_owned()]);
        chart.add_series(Series::new("nan", vec![f64::NAN]));
        assert!(matches!(chart.validate(), Err(ChartError::NonFiniteValue { .. })));
    }

    #[test]
    fn value_range_includes_zero() {
        let mut chart = chart();
        let range = chart.value_range();
        assert_eq!(range.start, 0.0);
        assert!(range.end > 2.0);

        chart.axes(false);
        assert_eq!(chart.value_range(), 0.0..2.0);

        let mut negative = BarChart::new(vec!["a".to_owned(), "b".to_owned()]);
        negative.axes(false);
        negative.add_series(Series::new("", vec![-3.0, 5.0]));
        assert_eq!(negative.value_range(), -3.0..5.0);

        let mut flat = BarChart::new(vec!["a".to_owned()]);
        flat.add_series(Series::new("", vec![0.0]));
        assert_eq!(flat.value_range(), 0.0..1.0);
    }
}
