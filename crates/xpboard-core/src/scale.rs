//! Linear value → pixel mapping for bar charts
//!
//! Positions are relative to the top of the plotting area: `map(domain_max)`
//! is 0 and `map(0)` is the usable height, so bars grow upward from the
//! baseline.

use serde::Serialize;
use xpboard_types::{Series, Viewport};

use crate::error::ChartError;

/// Default number of tick intervals on the value axis
pub const DEFAULT_TICK_COUNT: usize = 5;

/// One value-axis tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    /// Pixel offset from the top of the plotting area
    pub position: f64,
}

/// Value object describing one chart's vertical scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    domain_max: f64,
    pixel_range: f64,
    ticks: Vec<Tick>,
}

impl Scale {
    fn new(domain_max: f64, pixel_range: f64, tick_count: usize) -> Self {
        let mut scale = Self {
            domain_max,
            pixel_range,
            ticks: Vec::new(),
        };

        let intervals = tick_count.max(1);
        scale.ticks = (0..=intervals)
            .map(|i| {
                let value = (domain_max / intervals as f64 * i as f64).round();
                Tick {
                    value,
                    position: scale.map(value),
                }
            })
            .collect();
        scale
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Usable plotting height in pixels
    pub fn pixel_range(&self) -> f64 {
        self.pixel_range
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Pixel offset (from the plot top) of `value`
    pub fn map(&self, value: f64) -> f64 {
        // unreachable through compute_scale (AllZero guard), kept as a fallback
        let domain = if self.domain_max > 0.0 {
            self.domain_max
        } else {
            1.0
        };
        self.pixel_range - (value / domain) * self.pixel_range
    }

    /// Pixel height of a bar for `value`, never negative
    pub fn bar_height(&self, value: f64) -> f64 {
        (self.map(0.0) - self.map(value)).max(0.0)
    }
}

/// Build the scale for `series` inside `viewport`
///
/// Checks, in order: empty series, usable area, all-zero values.
pub fn compute_scale(
    series: &Series,
    viewport: &Viewport,
    tick_count: usize,
) -> Result<Scale, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let width = viewport.usable_width();
    let height = viewport.usable_height();
    // written so NaN and infinities land here too
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(ChartError::ViewportTooSmall { width, height });
    }

    let domain_max = series.max_value();
    if domain_max == 0.0 {
        return Err(ChartError::AllZero);
    }

    Ok(Scale::new(domain_max, height, tick_count))
}
