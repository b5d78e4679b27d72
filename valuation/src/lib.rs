//! Portfolio valuation engine: interest accrual, per-class enrichment and
//! cross-category dashboard aggregation. Everything here is pure and
//! synchronous; price lookups and persistence live in the api crate.

pub mod aggregate;
pub mod enrich;
pub mod interest;
pub mod series;

pub use aggregate::build_dashboard;
pub use enrich::{
    enrich_bond, enrich_cash, enrich_gold, enrich_stock, gram_price_from_ounce,
    GRAMS_PER_TROY_OUNCE,
};
pub use interest::{accrued_bond_interest, accrued_cash_interest};
pub use series::{PerformanceSeries, SyntheticPerformanceSeries};
