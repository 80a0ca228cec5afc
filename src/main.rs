use c19_dashboard::{fetch, router, store, AppState, SnapshotStore};
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let snapshot_store = SnapshotStore::new(store::resolve_data_dir());
    snapshot_store.ensure_dir().await?;

    let state = AppState::new(snapshot_store, fetch::resolve_source_url());

    // Nothing to serve until at least one snapshot exists; a failed eager
    // fetch here is fatal.
    if state.store.list().await?.is_empty() {
        fetch::fetch_once(&state).await?;
    }

    tokio::spawn(fetch::run_scheduler(state.clone()));

    let app = router(state);
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(80);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
