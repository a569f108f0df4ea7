//! xpboard-core - Core library for xpboard
//!
//! Ingests fetched learner records, aggregates them into ranked series,
//! lays them out as bar-chart scenes and coordinates when those scenes are
//! redrawn.

pub mod aggregate;
pub mod cache;
pub mod chart;
pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod export;
pub mod format;
pub mod ingest;
pub mod normalize;
pub mod render;
pub mod scale;
pub mod source;
pub mod summary;

pub use aggregate::{aggregate, aggregate_top, series_for, skill_levels, xp_by_project, Reducer};
pub use cache::DatasetCache;
pub use chart::{build_chart, render_chart, ChartStyle, ValueUnit};
pub use config::DashboardConfig;
pub use debounce::{spawn_resize_listener, ResizeDebouncer, DEFAULT_RESIZE_QUIET};
pub use error::{ChartError, CoreError, IngestReport};
pub use event::{DashboardEvent, EventBus, RenderTrigger, SkipReason};
pub use export::{export_chart_json, render_svg, SvgSurface};
pub use ingest::parse_response;
pub use normalize::{normalize_project_name, normalize_skill_name};
pub use render::{build_charts, DrawingSurface, RenderCoordinator, RenderSettings};
pub use scale::{compute_scale, Scale, Tick, DEFAULT_TICK_COUNT};
pub use source::{load_dataset, DataSource, FileSource, StaticSource};
pub use summary::{compute_summary, recent_transactions, Summary, TotalXpPolicy, TransactionRow};
