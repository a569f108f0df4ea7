use serde::{Deserialize, Serialize};

use super::scene::ChartKind;

/// Default cap on the number of entries a chart displays
pub const MAX_SERIES_LEN: usize = 10;

/// One aggregated (label, value) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Ranked, capped list of labeled values feeding one chart
///
/// Invariants (enforced by [`Series::ranked`]):
/// - values are finite and non-negative
/// - sorted by value descending, ties keep discovery order
/// - at most `limit` entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    entries: Vec<LabeledValue>,
}

impl Series {
    /// Rank entries given in discovery order and keep the top `limit`
    pub fn ranked(mut entries: Vec<LabeledValue>, limit: usize) -> Self {
        for entry in &mut entries {
            if !entry.value.is_finite() || entry.value < 0.0 {
                entry.value = 0.0;
            }
        }

        // sort_by is stable: equal values stay in discovery order
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        entries.truncate(limit);

        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LabeledValue] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest value, floored at 0 (0 for an empty series)
    pub fn max_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).fold(0.0, f64::max)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a LabeledValue;
    type IntoIter = std::slice::Iter<'a, LabeledValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Chart margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Pixel viewport supplied by the drawing surface at render time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Width of the plotting area (may be negative for tiny viewports)
    pub fn usable_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plotting area (may be negative for tiny viewports)
    pub fn usable_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Same margins, different outer size
    pub fn resized(&self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: self.margin,
        }
    }

    /// Default viewport of the XP-by-project chart
    pub const fn xp_default() -> Self {
        Self::new(500.0, 380.0, Margin::new(40.0, 30.0, 120.0, 70.0))
    }

    /// Default viewport of the skills chart
    pub const fn skills_default() -> Self {
        Self::new(500.0, 400.0, Margin::new(40.0, 30.0, 100.0, 70.0))
    }
}

/// Viewports of both dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewports {
    pub xp: Viewport,
    pub skills: Viewport,
}

impl Default for ChartViewports {
    fn default() -> Self {
        Self {
            xp: Viewport::xp_default(),
            skills: Viewport::skills_default(),
        }
    }
}

impl ChartViewports {
    pub fn for_kind(&self, kind: ChartKind) -> Viewport {
        match kind {
            ChartKind::XpByProject => self.xp,
            ChartKind::Skills => self.skills,
        }
    }
}
