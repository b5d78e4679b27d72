use auth::AuthService;
use sqlx::PgPool;
use std::sync::Arc;
use valuation::PerformanceSeries;

use crate::{
    config::AppConfig,
    repositories::{BondRepository, CashRepository, GoldRepository, StockRepository},
    services::{DashboardService, QuoteProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: PgPool,
    pub auth: Arc<dyn AuthService>,
    pub dashboard: Arc<DashboardService>,
    pub stock_repo: Arc<dyn StockRepository>,
    pub gold_repo: Arc<dyn GoldRepository>,
    pub cash_repo: Arc<dyn CashRepository>,
    pub bond_repo: Arc<dyn BondRepository>,
    pub quotes: Arc<dyn QuoteProvider>,
    pub performance: Arc<dyn PerformanceSeries>,
}

// Ensure critical dependencies uphold Send/Sync for Axum state usage.
#[allow(dead_code)]
fn _assert_state_types_are_send_sync()
where
    AppConfig: Send + Sync + 'static,
    PgPool: Send + Sync + 'static,
    dyn AuthService: Send + Sync,
    DashboardService: Send + Sync,
    dyn StockRepository: Send + Sync,
    dyn GoldRepository: Send + Sync,
    dyn CashRepository: Send + Sync,
    dyn BondRepository: Send + Sync,
    dyn QuoteProvider: Send + Sync,
    dyn PerformanceSeries: Send + Sync,
{
}

#[allow(dead_code)]
fn _assert_state_bounds() {
    fn assert_bounds<T: Clone + Send + Sync + 'static>() {}
    assert_bounds::<AppState>();
}
