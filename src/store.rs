use crate::dataset::Dataset;
use crate::errors::DataError;
use chrono::{DateTime, Local};
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;

const SNAPSHOT_PREFIX: &str = "c19";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("DASHBOARD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}

/// Append-only directory of timestamped CSV snapshots. Files are never
/// mutated or deleted; newer fetches supersede older ones by filename order.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir).await
    }

    /// All snapshot paths, ascending by filename. Filenames embed the fetch
    /// timestamp, so this is chronological order.
    pub async fn list(&self) -> Result<Vec<PathBuf>, DataError> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// The authoritative snapshot: the newest, i.e. last in ascending order.
    pub async fn current(&self) -> Result<PathBuf, DataError> {
        self.list().await?.pop().ok_or(DataError::EmptyStore)
    }

    pub async fn write(&self, dataset: &Dataset) -> Result<PathBuf, DataError> {
        let filename = format!(
            "{SNAPSHOT_PREFIX} {}.csv",
            Local::now().format(TIMESTAMP_FORMAT)
        );
        let path = self.dir.join(filename);
        fs::write(&path, dataset.to_csv()?).await?;
        Ok(path)
    }

    /// File modification time of the current snapshot, shown as "last fetched".
    pub async fn last_fetched(&self) -> Result<DateTime<Local>, DataError> {
        let modified = fs::metadata(self.current().await?).await?.modified()?;
        Ok(modified.into())
    }

    pub async fn load_current(&self) -> Result<Dataset, DataError> {
        let bytes = fs::read(self.current().await?).await?;
        Dataset::from_snapshot(&bytes)
    }
}
