//! Resize debouncing
//!
//! Coalesces bursts of viewport resize events: only the newest viewport is
//! kept, and it fires once no further event has arrived for the quiet period.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};
use xpboard_types::ChartViewports;

use crate::render::{DrawingSurface, RenderCoordinator};

/// Default quiet period before a resize re-renders
pub const DEFAULT_RESIZE_QUIET: Duration = Duration::from_millis(250);

/// Trailing-edge debounce state for resize events
#[derive(Debug)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(Instant, ChartViewports)>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a resize at `now`, replacing any pending one
    pub fn push(&mut self, now: Instant, viewports: ChartViewports) {
        if self.pending.is_some() {
            trace!("Coalescing resize event");
        }
        self.pending = Some((now, viewports));
    }

    /// When the pending resize becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at + self.quiet)
    }

    /// Take the pending viewports if the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<ChartViewports> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(_, vp)| vp),
            _ => None,
        }
    }

    /// Take the pending viewports regardless of the quiet period
    pub fn flush(&mut self) -> Option<ChartViewports> {
        self.pending.take().map(|(_, vp)| vp)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_QUIET)
    }
}

/// Drive a [`ResizeDebouncer`] from a channel of raw resize events
///
/// Each debounced resize is forwarded to [`RenderCoordinator::resize`]. The
/// task ends when every sender is dropped; a resize still inside its quiet
/// window at that point is applied before the task exits.
pub fn spawn_resize_listener<S>(
    coordinator: Arc<Mutex<RenderCoordinator<S>>>,
    mut events: mpsc::Receiver<ChartViewports>,
    quiet: Duration,
) -> JoinHandle<()>
where
    S: DrawingSurface + Send + 'static,
{
    tokio::spawn(async move {
        let mut debouncer = ResizeDebouncer::new(quiet);

        loop {
            let deadline = debouncer.deadline();

            tokio::select! {
                received = events.recv() => {
                    match received {
                        Some(viewports) => debouncer.push(Instant::now(), viewports),
                        None => {
                            debug!(pending = debouncer.has_pending(), "Resize listener shutting down");
                            if let Some(viewports) = debouncer.flush() {
                                coordinator.lock().resize(viewports);
                            }
                            break;
                        }
                    }
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(viewports) = debouncer.poll(Instant::now()) {
                        coordinator.lock().resize(viewports);
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpboard_types::Viewport;

    fn viewports(width: f64) -> ChartViewports {
        ChartViewports {
            xp: Viewport::xp_default().resized(width, 380.0),
            skills: Viewport::skills_default().resized(width, 400.0),
        }
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));

        debouncer.push(start, viewports(600.0));
        assert!(debouncer.poll(start + Duration::from_millis(100)).is_none());
        assert!(debouncer.has_pending());

        let fired = debouncer.poll(start + Duration::from_millis(250));
        assert_eq!(fired, Some(viewports(600.0)));
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_debouncer_latest_event_wins_and_resets_window() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));

        debouncer.push(start, viewports(600.0));
        debouncer.push(start + Duration::from_millis(200), viewports(700.0));

        // first deadline has passed, but the second event restarted the window
        assert!(debouncer.poll(start + Duration::from_millis(300)).is_none());
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(450))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(450)),
            Some(viewports(700.0))
        );
    }

    #[test]
    fn test_debouncer_flush_ignores_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));

        debouncer.push(start, viewports(600.0));
        assert_eq!(debouncer.flush(), Some(viewports(600.0)));
        assert!(debouncer.flush().is_none());
        assert!(debouncer.deadline().is_none());
    }

    #[test]
    fn test_debouncer_idle_has_no_deadline() {
        let mut debouncer = ResizeDebouncer::default();
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.poll(Instant::now()).is_none());
    }
}
