pub mod app;
pub mod cache;
pub mod dataset;
pub mod errors;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod query;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use cache::DatasetCache;
pub use dataset::Dataset;
pub use state::AppState;
pub use store::SnapshotStore;
