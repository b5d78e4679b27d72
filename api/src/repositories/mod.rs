pub mod bond_repository;
pub mod cash_repository;
pub mod gold_repository;
pub mod stock_repository;

pub use bond_repository::{BondRepository, PostgresBondRepository};
pub use cash_repository::{CashRepository, PostgresCashRepository};
pub use gold_repository::{GoldRepository, PostgresGoldRepository};
pub use stock_repository::{PostgresStockRepository, StockRepository};
