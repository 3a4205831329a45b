// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};

use std::ops::Range;

/// fraction of the bar extent added on each side of the x axis
const MARGIN: f64 = 0.05;

/// Positions of the bars of several series drawn side by side per category.
///
/// Series `s` places its bar for category `i` at `i + s * bar_width`, so each
/// series is shifted one bar width to the right of the previous one. Bars are
/// centred on their offset.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedLayout {
    categories: usize,
    series: usize,
    bar_width: f64,
}

impl GroupedLayout {
    pub fn new(categories: usize, series: usize, bar_width: f64) -> Self {
        Self {
            categories,
            series,
            bar_width,
        }
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    pub fn offsets(&self, series: usize) -> Vec<f64> {
        (0..self.categories)
            .map(|i| i as f64 + series as f64 * self.bar_width)
            .collect()
    }

    /// Label position for a category: one bar width right of the category
    /// index, under the second bar of a grouped chart. A single series keeps
    /// its label under its only bar.
    pub fn tick(&self, category: usize) -> f64 {
        let shift = if self.series > 1 { self.bar_width } else { 0.0 };
        category as f64 + shift
    }

    pub fn ticks(&self) -> Vec<f64> {
        (0..self.categories).map(|i| self.tick(i)).collect()
    }

    /// Index of the category whose tick is at `x`, if any.
    pub fn category_at(&self, x: f64) -> Option<usize> {
        let nearest = x - self.tick(0);
        if nearest < -0.5 {
            return None;
        }
        let index = nearest.round() as usize;
        if index < self.categories && (self.tick(index) - x).abs() < 1e-9 {
            Some(index)
        } else {
            None
        }
    }

    /// From the left edge of the first bar to the right edge of the last one.
    pub fn extent(&self) -> Range<f64> {
        let half = self.bar_width / 2.0;
        let last = self.categories.saturating_sub(1) as f64
            + self.series.saturating_sub(1) as f64 * self.bar_width;
        -half..(last + half)
    }

    pub fn padded_extent(&self) -> Range<f64> {
        let extent = self.extent();
        let pad = (extent.end - extent.start) * MARGIN;
        (extent.start - pad)..(extent.end + pad)
    }

    /// An x axis over `range` with key points at the category ticks.
    pub fn coord(&self, range: Range<f64>) -> GroupCoord {
        GroupCoord {
            range,
            ticks: self.ticks(),
        }
    }
}

/// Linear coordinate whose key points are a fixed set of tick positions
/// instead of round numbers.
pub struct GroupCoord {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl Ranged for GroupCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        if span <= 0.0 {
            return limit.0;
        }
        let ratio = (*value - self.range.start) / span;
        limit.0 + ((limit.1 - limit.0) as f64 * ratio).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max = hint.max_num_points();
        if max == 0 || self.ticks.is_empty() {
            return Vec::new();
        }
        let step = (self.ticks.len() + max - 1) / max;
        self.ticks.iter().copied().step_by(step.max(1)).collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}
