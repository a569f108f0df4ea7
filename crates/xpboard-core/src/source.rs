//! Data-source boundary
//!
//! Authentication and GraphQL transport live outside this crate; a
//! [`DataSource`] is anything that can hand back an already-fetched dataset.

use parking_lot::Mutex;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use xpboard_types::CachedDataset;

use crate::error::CoreError;
use crate::ingest::parse_response;
use crate::render::{DrawingSurface, RenderCoordinator};

pub trait DataSource {
    /// One awaited fetch yielding a complete dataset or failing
    fn fetch(&self) -> impl Future<Output = Result<CachedDataset, CoreError>> + Send;
}

/// Reads a saved GraphQL response from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    async fn fetch(&self) -> Result<CachedDataset, CoreError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CoreError::FileRead {
                    path: self.path.clone(),
                    source,
                })?;
        let (dataset, report) = parse_response(&content)?;
        info!(
            path = %self.path.display(),
            accepted = report.accepted,
            skipped = report.skipped,
            "Response file ingested"
        );
        Ok(dataset)
    }
}

/// Fixed dataset, handy for replays and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: CachedDataset,
}

impl StaticSource {
    pub fn new(dataset: CachedDataset) -> Self {
        Self { dataset }
    }
}

impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<CachedDataset, CoreError> {
        Ok(self.dataset.clone())
    }
}

/// Fetch from `source` and hand the result to the coordinator
///
/// The coordinator is marked as loading for the duration of the fetch, so
/// debounced resizes arriving meanwhile are skipped instead of rendering a
/// stale cache. The lock is never held across the await.
pub async fn load_dataset<S, D>(
    coordinator: &Mutex<RenderCoordinator<S>>,
    source: &D,
) -> Result<Arc<CachedDataset>, CoreError>
where
    S: DrawingSurface,
    D: DataSource,
{
    coordinator.lock().begin_load();

    match source.fetch().await {
        Ok(dataset) => Ok(coordinator.lock().complete_load(dataset)),
        Err(e) => {
            coordinator.lock().fail_load(e.to_string());
            Err(e)
        }
    }
}
