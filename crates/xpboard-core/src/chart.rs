//! Scene construction for ranked bar charts
//!
//! [`build_chart`] is pure: identical inputs produce identical element
//! sequences. Gridlines and value-axis ticks are emitted before bars so that
//! a surface drawing in input order keeps them behind.

use xpboard_types::{
    Axis, ChartKind, Gradient, RenderedChart, SceneElement, Series, ValueLabel, Viewport,
};

use crate::format::format_thousands;
use crate::normalize::truncate_label;
use crate::scale::{compute_scale, Scale};

/// Gap between the value axis and its tick labels
const Y_TICK_LABEL_GAP: f64 = 10.0;
/// Horizontal anchor of the rotated value-axis title
const AXIS_TITLE_X: f64 = 20.0;

/// How values are written on a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueUnit {
    /// Grouped thousands, `XP` suffix in tooltips
    Xp,
    /// Raw value with a `%` suffix
    Percent,
}

impl ValueUnit {
    /// Text for value labels and axis ticks
    pub fn format_value(&self, value: f64) -> String {
        match self {
            ValueUnit::Xp => format_thousands(value),
            ValueUnit::Percent => format!("{}%", value),
        }
    }

    pub fn tooltip(&self, label: &str, value: f64) -> String {
        match self {
            ValueUnit::Xp => format!("{}: {} XP", label, format_thousands(value)),
            ValueUnit::Percent => format!("{}: {}%", label, value),
        }
    }
}

/// Cosmetic configuration of one chart type
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub axis_title: String,
    pub unit: ValueUnit,
    /// Labels longer than this are truncated
    pub label_max_chars: usize,
    /// Characters kept before the ellipsis
    pub label_keep_chars: usize,
    /// Category label rotation in degrees
    pub label_rotation: f64,
    /// Distance of category labels below the baseline
    pub label_offset: f64,
    /// Distance of value labels above the bar top
    pub value_label_offset: f64,
    /// Fraction of each slot left empty around the bar
    pub bar_padding: f64,
    /// Bars shorter than this get no value label
    pub value_label_min_height: f64,
    pub gradient: Gradient,
}

impl ChartStyle {
    /// XP-by-project chart: purple palette
    pub fn xp_by_project() -> Self {
        Self {
            kind: ChartKind::XpByProject,
            axis_title: "XP Amount".to_string(),
            unit: ValueUnit::Xp,
            label_max_chars: 15,
            label_keep_chars: 12,
            label_rotation: -55.0,
            label_offset: 25.0,
            value_label_offset: 7.0,
            bar_padding: 0.3,
            value_label_min_height: 15.0,
            gradient: Gradient::new("#A78BFA", "#7C3AED"),
        }
    }

    /// Skills chart: pink palette
    pub fn skills() -> Self {
        Self {
            kind: ChartKind::Skills,
            axis_title: "Skill Level (%)".to_string(),
            unit: ValueUnit::Percent,
            label_max_chars: 12,
            label_keep_chars: 9,
            label_rotation: -45.0,
            label_offset: 25.0,
            value_label_offset: 5.0,
            bar_padding: 0.3,
            value_label_min_height: 15.0,
            gradient: Gradient::new("#F472B6", "#EC4899"),
        }
    }

    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::XpByProject => Self::xp_by_project(),
            ChartKind::Skills => Self::skills(),
        }
    }
}

/// Assemble the scene for `series` drawn with `scale` inside `viewport`
pub fn build_chart(
    series: &Series,
    scale: &Scale,
    viewport: &Viewport,
    style: &ChartStyle,
) -> Vec<SceneElement> {
    let left = viewport.margin.left;
    let top = viewport.margin.top;
    let plot_width = viewport.usable_width();
    let baseline = top + scale.pixel_range();

    let mut elements = Vec::with_capacity(scale.ticks().len() * 2 + series.len() * 2 + 1);

    // Gridlines + value axis
    for tick in scale.ticks() {
        let y = top + tick.position;
        elements.push(SceneElement::GridLine {
            y,
            x1: left,
            x2: left + plot_width,
        });
        elements.push(SceneElement::AxisTick {
            axis: Axis::Y,
            x: left - Y_TICK_LABEL_GAP,
            y,
            label: style.unit.format_value(tick.value),
            rotation: 0.0,
        });
    }

    if series.is_empty() {
        return elements;
    }

    let slot = plot_width / series.len() as f64;
    let bar_width = (slot * (1.0 - style.bar_padding)).max(0.0);
    let inset = slot * style.bar_padding / 2.0;

    // Category labels
    for (i, entry) in series.iter().enumerate() {
        let center = left + i as f64 * slot + inset + bar_width / 2.0;
        elements.push(SceneElement::AxisTick {
            axis: Axis::X,
            x: center,
            y: baseline + style.label_offset,
            label: truncate_label(&entry.label, style.label_max_chars, style.label_keep_chars),
            rotation: style.label_rotation,
        });
    }

    elements.push(SceneElement::AxisTitle {
        text: style.axis_title.clone(),
        x: AXIS_TITLE_X.min(left / 2.0),
        y: top + scale.pixel_range() / 2.0,
        rotation: -90.0,
    });

    // Bars
    for (i, entry) in series.iter().enumerate() {
        let x = left + i as f64 * slot + inset;
        let y = top + scale.map(entry.value);
        let height = scale.bar_height(entry.value);

        let value_label = (height > style.value_label_min_height).then(|| ValueLabel {
            x: x + bar_width / 2.0,
            y: y - style.value_label_offset,
            text: style.unit.format_value(entry.value),
        });

        elements.push(SceneElement::Bar {
            x,
            y,
            width: bar_width,
            height,
            tooltip: style.unit.tooltip(&entry.label, entry.value),
            value_label,
        });
    }

    elements
}

/// Scale and build a chart, degrading to a placeholder on degenerate input
pub fn render_chart(
    series: &Series,
    viewport: &Viewport,
    style: &ChartStyle,
    tick_count: usize,
) -> RenderedChart {
    let (elements, placeholder) = match compute_scale(series, viewport, tick_count) {
        Ok(scale) => (build_chart(series, &scale, viewport, style), None),
        Err(e) => {
            tracing::debug!(chart = style.kind.slug(), reason = %e, "Rendering placeholder");
            (Vec::new(), Some(e.placeholder()))
        }
    };

    RenderedChart {
        kind: style.kind,
        width: viewport.width,
        height: viewport.height,
        gradient: style.gradient.clone(),
        elements,
        placeholder,
    }
}
