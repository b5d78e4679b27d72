use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use domain::{AddStockRequest, EnrichedStock, StockHolding};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{auth_middleware::CurrentUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio/stocks", get(list_stocks).post(add_stock))
        .route("/portfolio/stocks/:holding_id", delete(remove_stock))
}

async fn list_stocks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<EnrichedStock>>, StatusCode> {
    state
        .dashboard
        .enriched_stocks(user.user().id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn add_stock(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddStockRequest>,
) -> Result<(StatusCode, Json<StockHolding>), StatusCode> {
    if payload.symbol.trim().is_empty()
        || payload.quantity <= Decimal::ZERO
        || payload.cost_basis_price <= Decimal::ZERO
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let holding = state
        .stock_repo
        .create(user.user().id, &payload)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(holding)))
}

async fn remove_stock(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(holding_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state
        .stock_repo
        .delete(user.user().id, holding_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
