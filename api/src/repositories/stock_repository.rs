use anyhow::Result;
use async_trait::async_trait;
use domain::{AddStockRequest, StockHolding};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, payload: &AddStockRequest) -> Result<StockHolding>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<StockHolding>>;
    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PostgresStockRepository {
    pool: PgPool,
}

impl PostgresStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_holding(row: &sqlx::postgres::PgRow) -> Result<StockHolding> {
        Ok(StockHolding {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            symbol: row.try_get("symbol")?,
            cost_basis_price: row.try_get("cost_basis_price")?,
            quantity: row.try_get("quantity")?,
        })
    }
}

#[async_trait]
impl StockRepository for PostgresStockRepository {
    async fn create(&self, user_id: Uuid, payload: &AddStockRequest) -> Result<StockHolding> {
        let holding = StockHolding {
            id: Uuid::new_v4(),
            user_id,
            symbol: payload.symbol.trim().to_uppercase(),
            cost_basis_price: payload.cost_basis_price,
            quantity: payload.quantity,
        };
        sqlx::query(
            "INSERT INTO stock_holdings (id, user_id, symbol, cost_basis_price, quantity)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(holding.id)
        .bind(holding.user_id)
        .bind(&holding.symbol)
        .bind(holding.cost_basis_price)
        .bind(holding.quantity)
        .execute(&self.pool)
        .await?;
        Ok(holding)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<StockHolding>> {
        let rows = sqlx::query(
            "SELECT id, user_id, symbol, cost_basis_price, quantity
             FROM stock_holdings WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_holding).collect()
    }

    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stock_holdings WHERE id = $1 AND user_id = $2")
            .bind(holding_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
