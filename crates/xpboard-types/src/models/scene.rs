//! Drawing-surface-agnostic scene description
//!
//! All coordinates are absolute pixels in viewport space (margins included),
//! with the origin at the top-left corner and y growing downward.

use serde::{Deserialize, Serialize};

/// Which dashboard chart a scene belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    XpByProject,
    Skills,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::XpByProject, ChartKind::Skills];

    /// Stable identifier, used for file names and gradient ids
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::XpByProject => "xp-by-project",
            ChartKind::Skills => "skills",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::XpByProject => "XP by Project",
            ChartKind::Skills => "Skills",
        }
    }
}

/// Axis an [`SceneElement::AxisTick`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Numeric annotation drawn above a bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One visual primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneElement {
    Bar {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        tooltip: String,
        value_label: Option<ValueLabel>,
    },
    /// Tick label; `(x, y)` is the text anchor, rotation in degrees
    AxisTick {
        axis: Axis,
        x: f64,
        y: f64,
        label: String,
        rotation: f64,
    },
    /// Horizontal gridline at `y` spanning `x1..x2`
    GridLine { y: f64, x1: f64, x2: f64 },
    AxisTitle {
        text: String,
        x: f64,
        y: f64,
        rotation: f64,
    },
}

impl SceneElement {
    pub fn is_bar(&self) -> bool {
        matches!(self, SceneElement::Bar { .. })
    }

    pub fn is_grid_line(&self) -> bool {
        matches!(self, SceneElement::GridLine { .. })
    }
}

/// Two-stop vertical color gradient used to fill bars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub top: String,
    pub bottom: String,
}

impl Gradient {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }
}

/// Degenerate chart states rendered as a message instead of bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoData,
    AllZero,
    ViewportTooSmall,
}

impl Placeholder {
    /// User-facing text for this state on the given chart
    pub fn message(&self, kind: ChartKind) -> &'static str {
        match (self, kind) {
            (Placeholder::NoData, ChartKind::XpByProject) => "No project XP data available",
            (Placeholder::NoData, ChartKind::Skills) => "No skills data available.",
            (Placeholder::AllZero, ChartKind::XpByProject) => "All projects have 0 XP",
            (Placeholder::AllZero, ChartKind::Skills) => "All skills have 0% progress.",
            (Placeholder::ViewportTooSmall, _) => "Chart cannot be rendered (too small).",
        }
    }
}

/// Complete output for one chart, handed to a drawing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub width: f64,
    pub height: f64,
    pub gradient: Gradient,
    /// Ordered elements; empty when `placeholder` is set
    pub elements: Vec<SceneElement>,
    pub placeholder: Option<Placeholder>,
}

impl RenderedChart {
    pub fn bar_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_bar()).count()
    }

    /// Placeholder text, if this chart is in a degenerate state
    pub fn placeholder_message(&self) -> Option<&'static str> {
        self.placeholder.map(|p| p.message(self.kind))
    }
}
