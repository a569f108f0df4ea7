//! Render coordination
//!
//! Owns the last-fetched dataset and decides when both charts are rebuilt:
//! on load completion, and on debounced resize when data is available.

use std::sync::Arc;
use tracing::{debug, info, warn};
use xpboard_types::{CachedDataset, ChartKind, ChartViewports, RenderedChart, MAX_SERIES_LEN};

use crate::aggregate::series_for;
use crate::cache::DatasetCache;
use crate::chart::{render_chart, ChartStyle};
use crate::config::DashboardConfig;
use crate::event::{DashboardEvent, EventBus, RenderTrigger, SkipReason};
use crate::scale::DEFAULT_TICK_COUNT;

/// Sink that turns scene descriptions into visible output
pub trait DrawingSurface {
    fn draw(&mut self, chart: RenderedChart);
}

/// Knobs of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Maximum bars per chart
    pub top_n: usize,
    /// Value-axis tick intervals
    pub tick_count: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            top_n: MAX_SERIES_LEN,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

impl From<&DashboardConfig> for RenderSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            top_n: config.top_n,
            tick_count: config.tick_count,
        }
    }
}

/// Build both dashboard charts from a dataset
pub fn build_charts(
    dataset: &CachedDataset,
    viewports: &ChartViewports,
    settings: RenderSettings,
) -> [RenderedChart; 2] {
    ChartKind::ALL.map(|kind| {
        render_chart(
            &series_for(dataset, kind, settings.top_n),
            &viewports.for_kind(kind),
            &ChartStyle::for_kind(kind),
            settings.tick_count,
        )
    })
}

/// Coordinates loads, resizes and logout against one drawing surface
pub struct RenderCoordinator<S> {
    surface: S,
    cache: DatasetCache,
    settings: RenderSettings,
    viewports: ChartViewports,
    load_in_flight: bool,
    event_bus: EventBus,
}

impl<S: DrawingSurface> RenderCoordinator<S> {
    pub fn new(surface: S, settings: RenderSettings, viewports: ChartViewports) -> Self {
        Self {
            surface,
            cache: DatasetCache::new(),
            settings,
            viewports,
            load_in_flight: false,
            event_bus: EventBus::default_capacity(),
        }
    }

    /// Create from a dashboard configuration
    pub fn from_config(surface: S, config: &DashboardConfig) -> Self {
        Self::new(surface, RenderSettings::from(config), config.viewports)
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn dataset(&self) -> Option<Arc<CachedDataset>> {
        self.cache.get()
    }

    pub fn viewports(&self) -> ChartViewports {
        self.viewports
    }

    pub fn is_loading(&self) -> bool {
        self.load_in_flight
    }

    /// Mark a fetch as started; resizes are skipped until it settles
    pub fn begin_load(&mut self) {
        self.load_in_flight = true;
        self.event_bus.publish(DashboardEvent::LoadStarted);
        debug!("Load started");
    }

    /// Cache a freshly fetched dataset and render both charts
    pub fn complete_load(&mut self, dataset: CachedDataset) -> Arc<CachedDataset> {
        let records = dataset.record_count();
        let dataset = self.cache.set(dataset);
        self.load_in_flight = false;

        info!(records, "Dataset loaded");
        self.event_bus
            .publish(DashboardEvent::LoadCompleted { records });

        self.render(&dataset, RenderTrigger::Load);
        dataset
    }

    /// A fetch failed: keep whatever was cached before
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.load_in_flight = false;
        warn!(error = %message, "Load failed");
        self.event_bus.publish(DashboardEvent::LoadFailed(message));
    }

    /// Apply a (debounced) viewport change
    ///
    /// Returns `true` if the charts were rebuilt. Without a cached dataset,
    /// or while a load is in flight, only the viewports are recorded.
    pub fn resize(&mut self, viewports: ChartViewports) -> bool {
        self.viewports = viewports;

        let skip = if self.load_in_flight {
            Some(SkipReason::LoadInFlight)
        } else {
            None
        };

        match (skip, self.cache.get()) {
            (None, Some(dataset)) => {
                self.render(&dataset, RenderTrigger::Resize);
                true
            }
            (skip, _) => {
                let reason = skip.unwrap_or(SkipReason::NoDataset);
                debug!(?reason, "Skipping resize render");
                self.event_bus
                    .publish(DashboardEvent::ResizeSkipped(reason));
                false
            }
        }
    }

    /// Drop the cached dataset; nothing renders until the next load
    pub fn logout(&mut self) {
        self.cache.clear();
        self.load_in_flight = false;
        info!("Logged out, dataset cleared");
        self.event_bus.publish(DashboardEvent::LoggedOut);
    }

    fn render(&mut self, dataset: &CachedDataset, trigger: RenderTrigger) {
        for chart in build_charts(dataset, &self.viewports, self.settings) {
            debug!(
                chart = chart.kind.slug(),
                bars = chart.bar_count(),
                placeholder = ?chart.placeholder,
                "Drawing chart"
            );
            self.surface.draw(chart);
        }
        self.event_bus
            .publish(DashboardEvent::ChartsRendered { trigger });
    }
}
