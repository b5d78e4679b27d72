use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use domain::{AddGoldRequest, EnrichedGold, GoldHolding};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{auth_middleware::CurrentUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio/gold", get(list_gold).post(add_gold))
        .route("/portfolio/gold/:holding_id", delete(remove_gold))
}

async fn list_gold(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<EnrichedGold>>, StatusCode> {
    state
        .dashboard
        .enriched_gold(user.user().id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn add_gold(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddGoldRequest>,
) -> Result<(StatusCode, Json<GoldHolding>), StatusCode> {
    if payload.quantity_grams <= Decimal::ZERO
        || payload.cost_basis_price_per_gram <= Decimal::ZERO
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let holding = state
        .gold_repo
        .create(user.user().id, &payload)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(holding)))
}

async fn remove_gold(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(holding_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state
        .gold_repo
        .delete(user.user().id, holding_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
