use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Stocks,
    Gold,
    Cash,
    Bonds,
}

impl AssetCategory {
    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::Stocks => "Stocks",
            AssetCategory::Gold => "Gold",
            AssetCategory::Cash => "Cash",
            AssetCategory::Bonds => "Bonds",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StockHolding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub cost_basis_price: Decimal,
    pub quantity: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoldHolding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quantity_grams: Decimal,
    pub cost_basis_price_per_gram: Decimal,
    pub purchase_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CashHolding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub monthly_interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub kind: String,
    pub bank: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BondHolding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bond_name: String,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub principal_amount: Decimal,
    pub coupon_rate: Decimal,
}

/// A live market quote for one symbol. `previous_close` is only present when
/// the upstream response carries it (dashboard day-change math needs it).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: Decimal,
    pub previous_close: Option<Decimal>,
}

/// Whether market-derived fields on an enriched holding were computed from a
/// live quote or degraded because the quote was unavailable.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceStatus {
    Live,
    Unavailable,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichedStock {
    #[serde(flatten)]
    pub holding: StockHolding,
    pub current_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub gain: Option<Decimal>,
    pub gain_percent: Option<Decimal>,
    pub day_change: Option<Decimal>,
    pub day_change_percent: Option<Decimal>,
    pub price_status: PriceStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichedGold {
    #[serde(flatten)]
    pub holding: GoldHolding,
    pub live_price_per_gram: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub gain: Option<Decimal>,
    pub gain_percent: Option<Decimal>,
    pub price_status: PriceStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichedCash {
    #[serde(flatten)]
    pub holding: CashHolding,
    pub interest_earned: Decimal,
    pub current_value: Decimal,
    pub gain_percent: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichedBond {
    #[serde(flatten)]
    pub holding: BondHolding,
    pub interest_accrued: Decimal,
    pub current_value: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct CategorySummary {
    pub value: Decimal,
    pub gain: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct PortfolioBreakdown {
    pub stocks: CategorySummary,
    pub gold: CategorySummary,
    pub cash: CategorySummary,
    pub bonds: CategorySummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AllocationSlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarketMover {
    pub name: String,
    pub value: Decimal,
    pub change: Option<Decimal>,
}

/// One row of the cross-category performer ranking. Gold appears as a single
/// pseudo-item covering the whole category.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HoldingPerformance {
    pub name: String,
    pub category: AssetCategory,
    pub current_value: Decimal,
    pub gain: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct DashboardKpis {
    pub total_portfolio_value: Decimal,
    pub total_gain_loss: Decimal,
    pub total_day_change: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardSummary {
    pub kpis: DashboardKpis,
    pub breakdown: PortfolioBreakdown,
    pub asset_allocation: Vec<AllocationSlice>,
    pub performance: Vec<PerformancePoint>,
    pub market_movers: Vec<MarketMover>,
    pub top_performers: Vec<HoldingPerformance>,
    pub worst_performers: Vec<HoldingPerformance>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    pub symbol: String,
    pub cost_basis_price: Decimal,
    pub quantity: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AddGoldRequest {
    pub quantity_grams: Decimal,
    pub cost_basis_price_per_gram: Decimal,
    pub purchase_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AddCashRequest {
    pub amount: Decimal,
    pub monthly_interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub kind: String,
    pub bank: String,
}

#[derive(Debug, Deserialize)]
pub struct AddBondRequest {
    pub bond_name: String,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub principal_amount: Decimal,
    pub coupon_rate: Decimal,
}
