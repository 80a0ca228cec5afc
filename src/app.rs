use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        .route("/api/provinces", get(handlers::provinces))
        .route("/api/regions", get(handlers::regions))
        .route("/api/chart", get(handlers::chart))
        .with_state(state)
}
