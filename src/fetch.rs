use crate::cache::DatasetCache;
use crate::dataset::Dataset;
use crate::errors::DataError;
use crate::state::AppState;
use crate::store::SnapshotStore;
use std::{env, time::Duration};
use tokio::time::interval;
use tracing::{error, info};

pub const SOURCE_CSV_URL: &str =
    "https://docs.google.com/spreadsheets/d/1D6okqtBS3S2NRC7GFVHzaZ67DuTw7LX49-fqSLwJyeo/export?format=csv";
pub const SOURCE_LINK_URL: &str =
    "https://docs.google.com/spreadsheets/d/1D6okqtBS3S2NRC7GFVHzaZ67DuTw7LX49-fqSLwJyeo";
pub const FETCH_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub fn resolve_source_url() -> String {
    env::var("DASHBOARD_SOURCE_URL").unwrap_or_else(|_| SOURCE_CSV_URL.to_string())
}

/// One fetch cycle: download the source CSV, validate and snapshot it,
/// invalidate the cache. Returns the number of rows fetched.
pub async fn fetch_once(state: &AppState) -> Result<usize, DataError> {
    let response = state
        .client
        .get(&state.source_url)
        .send()
        .await?
        .error_for_status()?;
    let bytes = response.bytes().await?;
    let rows = ingest(&bytes, &state.store, &state.cache).await?;
    info!("fetched {rows} rows");
    Ok(rows)
}

/// Validate a downloaded body and commit it. Validation happens before any
/// disk write, so a rejected dataset leaves the store untouched.
pub async fn ingest(
    bytes: &[u8],
    store: &SnapshotStore,
    cache: &DatasetCache,
) -> Result<usize, DataError> {
    let dataset = Dataset::from_source(bytes)?;
    store.write(&dataset).await?;
    cache.invalidate().await;
    Ok(dataset.len())
}

/// Background schedule: one fetch per interval, forever. A failed cycle is
/// logged and does not stop the schedule; the startup fetch (when the store
/// is empty) happens before this task is spawned.
pub async fn run_scheduler(state: AppState) {
    let mut ticker = interval(FETCH_INTERVAL);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if let Err(err) = fetch_once(&state).await {
            error!("scheduled fetch failed: {err}");
        }
    }
}
