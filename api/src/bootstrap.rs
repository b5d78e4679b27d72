use std::sync::Arc;

use anyhow::Result;
use auth::{AuthConfig, PasswordAuthService};
use chrono::Duration as ChronoDuration;
use sqlx::PgPool;
use valuation::SyntheticPerformanceSeries;

use crate::{
    config::AppConfig,
    repositories::{
        PostgresBondRepository, PostgresCashRepository, PostgresGoldRepository,
        PostgresStockRepository,
    },
    services::{CachedQuoteProvider, DashboardService, YahooQuoteProvider},
    state::AppState,
};

pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let pool = PgPool::connect(&config.database_url).await?;
    sqlx::migrate!("../migrations").run(&pool).await?;

    let auth_service = PasswordAuthService::new(
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            jwt_audience: config.jwt_audience.clone(),
            jwt_issuer: config.jwt_issuer.clone(),
            token_ttl: chrono_duration(config.session_ttl),
        },
        pool.clone(),
    );

    let stock_repo = Arc::new(PostgresStockRepository::new(pool.clone()));
    let gold_repo = Arc::new(PostgresGoldRepository::new(pool.clone()));
    let cash_repo = Arc::new(PostgresCashRepository::new(pool.clone()));
    let bond_repo = Arc::new(PostgresBondRepository::new(pool.clone()));

    let quotes = Arc::new(CachedQuoteProvider::new(
        YahooQuoteProvider::new(config.quote_api_base.clone(), config.quote_timeout),
        config.quote_cache_ttl,
    ));
    let performance = Arc::new(SyntheticPerformanceSeries::new());

    let dashboard = Arc::new(DashboardService::new(
        stock_repo.clone(),
        gold_repo.clone(),
        cash_repo.clone(),
        bond_repo.clone(),
        quotes.clone(),
        performance.clone(),
        config.quote_max_concurrency,
        config.performance_days,
    ));

    Ok(AppState {
        config: config.clone(),
        db: pool,
        auth: Arc::new(auth_service),
        dashboard,
        stock_repo,
        gold_repo,
        cash_repo,
        bond_repo,
        quotes,
        performance,
    })
}

fn chrono_duration(value: std::time::Duration) -> ChronoDuration {
    ChronoDuration::from_std(value).unwrap_or_else(|_| ChronoDuration::seconds(1))
}
