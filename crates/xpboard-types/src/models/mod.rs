//! Data models for xpboard

pub mod dataset;
pub mod record;
pub mod scene;
pub mod series;

pub use dataset::{CachedDataset, ReportedTotals, UserInfo};
pub use record::{AuditDirection, Record, RecordKind};
pub use scene::{
    Axis, ChartKind, Gradient, Placeholder, RenderedChart, SceneElement, ValueLabel,
};
pub use series::{ChartViewports, LabeledValue, Margin, Series, Viewport, MAX_SERIES_LEN};
