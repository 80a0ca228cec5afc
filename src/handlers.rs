use crate::errors::AppError;
use crate::models::{ChartQuery, ChartResponse, DropdownOption, RegionsQuery, StatusResponse};
use crate::query;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

const CHART_TITLE: &str = "Cumulative Cases";
const LAST_FETCHED_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let fetched = state.store.last_fetched().await?;
    Ok(Json(StatusResponse {
        last_fetched: format!("(last fetched {} PST)", fetched.format(LAST_FETCHED_FORMAT)),
    }))
}

pub async fn provinces(
    State(state): State<AppState>,
) -> Result<Json<Vec<DropdownOption>>, AppError> {
    let dataset = state.cache.dataset(&state.store).await?;
    Ok(Json(query::build_options(dataset.provinces())))
}

pub async fn regions(
    State(state): State<AppState>,
    Query(params): Query<RegionsQuery>,
) -> Result<Json<Vec<DropdownOption>>, AppError> {
    let dataset = state
        .cache
        .filtered(&state.store, selection(&params.province), None)
        .await?;
    Ok(Json(query::build_options(dataset.regions())))
}

pub async fn chart(
    State(state): State<AppState>,
    Query(params): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    let dataset = state
        .cache
        .filtered(
            &state.store,
            selection(&params.province),
            selection(&params.region),
        )
        .await?;
    Ok(Json(ChartResponse {
        title: CHART_TITLE.to_string(),
        points: query::cumulative_by_date(&dataset),
    }))
}

/// An absent or empty query parameter both mean "no selection".
fn selection(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
