//! xpboard-types - Shared data types for xpboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - xpboard-core (aggregation, scaling, scene building)
//! - xpboard (CLI and drawing surfaces)

pub mod models;

pub use models::{
    AuditDirection, Axis, CachedDataset, ChartKind, ChartViewports, Gradient, LabeledValue,
    Margin, Placeholder, Record, RecordKind, RenderedChart, ReportedTotals, SceneElement, Series,
    UserInfo, ValueLabel, Viewport, MAX_SERIES_LEN,
};
