use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use domain::{AddCashRequest, CashHolding, EnrichedCash};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{auth_middleware::CurrentUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio/cash", get(list_cash).post(add_cash))
        .route("/portfolio/cash/:holding_id", delete(remove_cash))
}

async fn list_cash(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<EnrichedCash>>, StatusCode> {
    state
        .dashboard
        .enriched_cash(user.user().id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn add_cash(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddCashRequest>,
) -> Result<(StatusCode, Json<CashHolding>), StatusCode> {
    if payload.amount < Decimal::ZERO || payload.monthly_interest_rate < Decimal::ZERO {
        return Err(StatusCode::BAD_REQUEST);
    }

    let holding = state
        .cash_repo
        .create(user.user().id, &payload)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(holding)))
}

async fn remove_cash(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(holding_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state
        .cash_repo
        .delete(user.user().id, holding_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
