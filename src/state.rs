use crate::cache::DatasetCache;
use crate::store::SnapshotStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
    pub cache: Arc<DatasetCache>,
    pub client: reqwest::Client,
    pub source_url: String,
}

impl AppState {
    pub fn new(store: SnapshotStore, source_url: String) -> Self {
        Self {
            store,
            cache: Arc::new(DatasetCache::new()),
            client: reqwest::Client::new(),
            source_url,
        }
    }
}
