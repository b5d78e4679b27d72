use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use chrono::Local;
use domain::{
    DashboardSummary, EnrichedBond, EnrichedCash, EnrichedGold, EnrichedStock, Quote,
};
use futures::future::join_all;
use metrics::counter;
use rust_decimal::Decimal;
use tokio::sync::Semaphore;
use tracing::warn;
use uuid::Uuid;
use valuation::{
    build_dashboard, enrich_bond, enrich_cash, enrich_gold, enrich_stock, gram_price_from_ounce,
    PerformanceSeries,
};

use crate::{
    repositories::{BondRepository, CashRepository, GoldRepository, StockRepository},
    services::market::{QuoteProvider, GOLD_FUTURES_SYMBOL},
};

/// Assembles the dashboard: loads all four holding classes, prices the
/// market-dependent ones, and hands the enriched rows to the valuation crate.
/// Quote failures degrade the affected holdings instead of failing the
/// request.
pub struct DashboardService {
    stock_repo: Arc<dyn StockRepository>,
    gold_repo: Arc<dyn GoldRepository>,
    cash_repo: Arc<dyn CashRepository>,
    bond_repo: Arc<dyn BondRepository>,
    quotes: Arc<dyn QuoteProvider>,
    performance: Arc<dyn PerformanceSeries>,
    quote_max_concurrency: usize,
    performance_days: u32,
}

impl DashboardService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stock_repo: Arc<dyn StockRepository>,
        gold_repo: Arc<dyn GoldRepository>,
        cash_repo: Arc<dyn CashRepository>,
        bond_repo: Arc<dyn BondRepository>,
        quotes: Arc<dyn QuoteProvider>,
        performance: Arc<dyn PerformanceSeries>,
        quote_max_concurrency: usize,
        performance_days: u32,
    ) -> Self {
        Self {
            stock_repo,
            gold_repo,
            cash_repo,
            bond_repo,
            quotes,
            performance,
            quote_max_concurrency: quote_max_concurrency.max(1),
            performance_days,
        }
    }

    pub async fn summary(&self, user_id: Uuid) -> Result<DashboardSummary> {
        let (stocks, gold, cash, bonds) = tokio::try_join!(
            self.stock_repo.list_by_user(user_id),
            self.gold_repo.list_by_user(user_id),
            self.cash_repo.list_by_user(user_id),
            self.bond_repo.list_by_user(user_id),
        )?;

        let mut symbols: Vec<String> = stocks.iter().map(|s| s.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        if !gold.is_empty() {
            symbols.push(GOLD_FUTURES_SYMBOL.to_string());
        }
        let quote_map = self.fetch_quotes(symbols).await;

        let gram_price = quote_map
            .get(GOLD_FUTURES_SYMBOL)
            .map(|quote| gram_price_from_ounce(quote.price));

        let as_of = Local::now().date_naive();
        let stocks: Vec<EnrichedStock> = stocks
            .iter()
            .map(|holding| enrich_stock(holding, quote_map.get(&holding.symbol)))
            .collect();
        let gold: Vec<EnrichedGold> = gold
            .iter()
            .map(|holding| enrich_gold(holding, gram_price))
            .collect();
        let cash: Vec<EnrichedCash> = cash
            .iter()
            .map(|holding| enrich_cash(holding, as_of))
            .collect();
        let bonds: Vec<EnrichedBond> = bonds
            .iter()
            .map(|holding| enrich_bond(holding, as_of))
            .collect();

        let performance = self.performance.series(self.performance_days);
        Ok(build_dashboard(&stocks, &gold, &cash, &bonds, performance))
    }

    pub async fn enriched_stocks(&self, user_id: Uuid) -> Result<Vec<EnrichedStock>> {
        let holdings = self.stock_repo.list_by_user(user_id).await?;
        let mut symbols: Vec<String> = holdings.iter().map(|s| s.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        let quote_map = self.fetch_quotes(symbols).await;
        Ok(holdings
            .iter()
            .map(|holding| enrich_stock(holding, quote_map.get(&holding.symbol)))
            .collect())
    }

    pub async fn enriched_gold(&self, user_id: Uuid) -> Result<Vec<EnrichedGold>> {
        let holdings = self.gold_repo.list_by_user(user_id).await?;
        if holdings.is_empty() {
            return Ok(Vec::new());
        }
        let gram_price = self.gold_gram_price().await;
        Ok(holdings
            .iter()
            .map(|holding| enrich_gold(holding, gram_price))
            .collect())
    }

    pub async fn enriched_cash(&self, user_id: Uuid) -> Result<Vec<EnrichedCash>> {
        let holdings = self.cash_repo.list_by_user(user_id).await?;
        let as_of = Local::now().date_naive();
        Ok(holdings
            .iter()
            .map(|holding| enrich_cash(holding, as_of))
            .collect())
    }

    pub async fn enriched_bonds(&self, user_id: Uuid) -> Result<Vec<EnrichedBond>> {
        let holdings = self.bond_repo.list_by_user(user_id).await?;
        let as_of = Local::now().date_naive();
        Ok(holdings
            .iter()
            .map(|holding| enrich_bond(holding, as_of))
            .collect())
    }

    async fn gold_gram_price(&self) -> Option<Decimal> {
        match self.quotes.quote(GOLD_FUTURES_SYMBOL).await {
            Ok(quote) => Some(gram_price_from_ounce(quote.price)),
            Err(err) => {
                counter!("quote_fetch_failures_total").increment(1);
                warn!(symbol = GOLD_FUTURES_SYMBOL, error = %err, "gold quote unavailable");
                None
            }
        }
    }

    /// One bounded lookup per distinct symbol. Failed symbols are simply
    /// absent from the result map.
    async fn fetch_quotes(&self, symbols: Vec<String>) -> HashMap<String, Quote> {
        let semaphore = Arc::new(Semaphore::new(self.quote_max_concurrency));
        let lookups = symbols.into_iter().map(|symbol| {
            let semaphore = semaphore.clone();
            let quotes = self.quotes.clone();
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                match quotes.quote(&symbol).await {
                    Ok(quote) => Some((symbol, quote)),
                    Err(err) => {
                        counter!("quote_fetch_failures_total").increment(1);
                        warn!(symbol, error = %err, "quote unavailable");
                        None
                    }
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }
}
