use crate::dataset::Dataset;
use crate::errors::DataError;
use crate::store::SnapshotStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

type FilterKey = (Option<String>, Option<String>);

#[derive(Default)]
struct Inner {
    dataset: Option<Arc<Dataset>>,
    filtered: HashMap<FilterKey, Arc<Dataset>>,
}

/// Single-value cache of the current snapshot's dataset, plus memoized
/// filtered views keyed by (province, region). Both live for one cache
/// generation: the fetcher calls `invalidate` after every successful
/// snapshot write, which clears them together. Handlers keep working on the
/// `Arc` they already hold, so invalidation never pulls data out from under
/// a request in flight.
#[derive(Default)]
pub struct DatasetCache {
    inner: Mutex<Inner>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full dataset, loaded from the current snapshot on miss.
    pub async fn dataset(&self, store: &SnapshotStore) -> Result<Arc<Dataset>, DataError> {
        let mut inner = self.inner.lock().await;
        Self::base(&mut *inner, store).await
    }

    /// Memoized filtered view for one (province, region) selection.
    pub async fn filtered(
        &self,
        store: &SnapshotStore,
        province: Option<&str>,
        region: Option<&str>,
    ) -> Result<Arc<Dataset>, DataError> {
        let key = (province.map(str::to_owned), region.map(str::to_owned));
        let mut inner = self.inner.lock().await;
        if let Some(hit) = inner.filtered.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let base = Self::base(&mut *inner, store).await?;
        let view = Arc::new(base.restricted(province, region));
        inner.filtered.insert(key, Arc::clone(&view));
        Ok(view)
    }

    pub async fn invalidate(&self) {
        let mut inner = self.inner.lock().await;
        inner.dataset = None;
        inner.filtered.clear();
    }

    async fn base(inner: &mut Inner, store: &SnapshotStore) -> Result<Arc<Dataset>, DataError> {
        if let Some(dataset) = &inner.dataset {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(store.load_current().await?);
        inner.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }
}
