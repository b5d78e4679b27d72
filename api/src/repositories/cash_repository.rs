use anyhow::Result;
use async_trait::async_trait;
use domain::{AddCashRequest, CashHolding};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait CashRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, payload: &AddCashRequest) -> Result<CashHolding>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CashHolding>>;
    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PostgresCashRepository {
    pool: PgPool,
}

impl PostgresCashRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_holding(row: &sqlx::postgres::PgRow) -> Result<CashHolding> {
        Ok(CashHolding {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            amount: row.try_get("amount")?,
            monthly_interest_rate: row.try_get("monthly_interest_rate")?,
            start_date: row.try_get("start_date")?,
            kind: row.try_get("kind")?,
            bank: row.try_get("bank")?,
        })
    }
}

#[async_trait]
impl CashRepository for PostgresCashRepository {
    async fn create(&self, user_id: Uuid, payload: &AddCashRequest) -> Result<CashHolding> {
        let holding = CashHolding {
            id: Uuid::new_v4(),
            user_id,
            amount: payload.amount,
            monthly_interest_rate: payload.monthly_interest_rate,
            start_date: payload.start_date,
            kind: payload.kind.trim().to_string(),
            bank: payload.bank.trim().to_string(),
        };
        sqlx::query(
            "INSERT INTO cash_holdings (id, user_id, amount, monthly_interest_rate, start_date, kind, bank)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(holding.id)
        .bind(holding.user_id)
        .bind(holding.amount)
        .bind(holding.monthly_interest_rate)
        .bind(holding.start_date)
        .bind(&holding.kind)
        .bind(&holding.bank)
        .execute(&self.pool)
        .await?;
        Ok(holding)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CashHolding>> {
        let rows = sqlx::query(
            "SELECT id, user_id, amount, monthly_interest_rate, start_date, kind, bank
             FROM cash_holdings WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_holding).collect()
    }

    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cash_holdings WHERE id = $1 AND user_id = $2")
            .bind(holding_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
