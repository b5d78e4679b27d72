use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use domain::{AddBondRequest, BondHolding, EnrichedBond};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{auth_middleware::CurrentUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio/bonds", get(list_bonds).post(add_bond))
        .route("/portfolio/bonds/:holding_id", delete(remove_bond))
}

async fn list_bonds(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<EnrichedBond>>, StatusCode> {
    state
        .dashboard
        .enriched_bonds(user.user().id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn add_bond(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddBondRequest>,
) -> Result<(StatusCode, Json<BondHolding>), StatusCode> {
    if payload.bond_name.trim().is_empty()
        || payload.principal_amount <= Decimal::ZERO
        || payload.coupon_rate < Decimal::ZERO
        || payload.maturity_date < payload.issue_date
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let holding = state
        .bond_repo
        .create(user.user().id, &payload)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(holding)))
}

async fn remove_bond(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(holding_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state
        .bond_repo
        .delete(user.user().id, holding_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
