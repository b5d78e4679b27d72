use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use domain::DashboardSummary;

use crate::{auth_middleware::CurrentUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/portfolio/summary", get(summary))
}

async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardSummary>, StatusCode> {
    state
        .dashboard
        .summary(user.user().id)
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!(error = %err, "failed to build dashboard summary");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
