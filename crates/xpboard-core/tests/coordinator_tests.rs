//! Integration tests for render coordination: debounced resize and loading

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;
use xpboard_core::{
    load_dataset, spawn_resize_listener, CoreError, DashboardEvent, DrawingSurface, FileSource,
    RenderCoordinator, RenderSettings, SkipReason, StaticSource,
};
use xpboard_types::{CachedDataset, ChartViewports, Record, RenderedChart, Viewport};

#[derive(Default)]
struct RecordingSurface {
    charts: Vec<RenderedChart>,
}

impl DrawingSurface for RecordingSurface {
    fn draw(&mut self, chart: RenderedChart) {
        self.charts.push(chart);
    }
}

type Shared = Arc<Mutex<RenderCoordinator<RecordingSurface>>>;

fn shared_coordinator() -> Shared {
    Arc::new(Mutex::new(RenderCoordinator::new(
        RecordingSurface::default(),
        RenderSettings::default(),
        ChartViewports::default(),
    )))
}

fn dataset() -> CachedDataset {
    CachedDataset {
        xp: vec![
            Record::xp("1", "/m/go-reloaded", 1200.0),
            Record::xp("2", "/m/ascii-art", 800.0),
        ],
        skills: vec![Record::skill("3", "skill_go", 55.0)],
        ..Default::default()
    }
}

fn viewports(width: f64) -> ChartViewports {
    ChartViewports {
        xp: Viewport::xp_default().resized(width, 380.0),
        skills: Viewport::skills_default().resized(width, 400.0),
    }
}

fn drawn(coordinator: &Shared) -> usize {
    coordinator.lock().surface().charts.len()
}

#[tokio::test(start_paused = true)]
async fn test_resize_burst_renders_once_after_quiet_period() {
    let coordinator = shared_coordinator();
    coordinator.lock().complete_load(dataset());
    assert_eq!(drawn(&coordinator), 2);

    let (tx, rx) = mpsc::channel(16);
    let listener = spawn_resize_listener(coordinator.clone(), rx, Duration::from_millis(250));

    for width in [520.0, 560.0, 600.0, 640.0, 680.0] {
        tx.send(viewports(width)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    // 100ms after the last event: still inside the quiet window
    assert_eq!(drawn(&coordinator), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    {
        let coord = coordinator.lock();
        let charts = &coord.surface().charts;
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[2].width, 680.0);
        assert_eq!(charts[3].width, 680.0);
    }

    drop(tx);
    listener.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_resize_before_load_never_builds_charts() {
    let coordinator = shared_coordinator();
    let mut events = coordinator.lock().event_bus().subscribe();

    let (tx, rx) = mpsc::channel(16);
    let listener = spawn_resize_listener(coordinator.clone(), rx, Duration::from_millis(250));

    tx.send(viewports(700.0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(drawn(&coordinator), 0);
    assert_eq!(
        events.try_recv().unwrap(),
        DashboardEvent::ResizeSkipped(SkipReason::NoDataset)
    );
    // viewport is still remembered for the first load
    assert_eq!(coordinator.lock().viewports(), viewports(700.0));

    coordinator.lock().complete_load(dataset());
    assert_eq!(coordinator.lock().surface().charts[0].width, 700.0);

    drop(tx);
    listener.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pending_resize_applied_when_channel_closes() {
    let coordinator = shared_coordinator();
    coordinator.lock().complete_load(dataset());

    let (tx, rx) = mpsc::channel(16);
    let listener = spawn_resize_listener(coordinator.clone(), rx, Duration::from_millis(250));

    tx.send(viewports(640.0)).await.unwrap();
    drop(tx);
    listener.await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    let coord = coordinator.lock();
    let charts = &coord.surface().charts;
    assert_eq!(charts.len(), 4);
    assert_eq!(charts[2].width, 640.0);
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_render_separately() {
    let coordinator = shared_coordinator();
    coordinator.lock().complete_load(dataset());

    let (tx, rx) = mpsc::channel(16);
    let listener = spawn_resize_listener(coordinator.clone(), rx, Duration::from_millis(250));

    tx.send(viewports(600.0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(viewports(800.0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(drawn(&coordinator), 6);

    drop(tx);
    listener.await.unwrap();
}

#[tokio::test]
async fn test_load_dataset_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("response.json");
    std::fs::write(
        &path,
        r#"{"data": {"transaction": [{"amount": 100, "path": "/m/go-reloaded", "type": "xp"}]}}"#,
    )
    .unwrap();

    let coordinator = Mutex::new(RenderCoordinator::new(
        RecordingSurface::default(),
        RenderSettings::default(),
        ChartViewports::default(),
    ));

    let dataset = load_dataset(&coordinator, &FileSource::new(&path))
        .await
        .unwrap();
    assert_eq!(dataset.xp.len(), 1);

    let coord = coordinator.lock();
    assert!(!coord.is_loading());
    assert_eq!(coord.surface().charts.len(), 2);
    assert_eq!(coord.surface().charts[0].bar_count(), 1);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_dataset() {
    let coordinator = Mutex::new(RenderCoordinator::new(
        RecordingSurface::default(),
        RenderSettings::default(),
        ChartViewports::default(),
    ));
    load_dataset(&coordinator, &StaticSource::new(dataset()))
        .await
        .unwrap();

    let missing = FileSource::new("/nonexistent/xpboard/response.json");
    let err = load_dataset(&coordinator, &missing).await.unwrap_err();
    assert!(matches!(err, CoreError::FileRead { .. }));

    let mut coord = coordinator.lock();
    assert!(!coord.is_loading());
    assert_eq!(coord.dataset().map(|d| d.xp.len()), Some(2));
    assert!(coord.resize(ChartViewports::default()));
}
