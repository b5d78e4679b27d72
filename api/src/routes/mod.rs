pub mod auth;
pub mod bonds;
pub mod cash;
pub mod dashboard;
pub mod gold;
pub mod health;
pub mod stocks;
