use anyhow::Result;
use async_trait::async_trait;
use domain::{AddGoldRequest, GoldHolding};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait GoldRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, payload: &AddGoldRequest) -> Result<GoldHolding>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GoldHolding>>;
    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PostgresGoldRepository {
    pool: PgPool,
}

impl PostgresGoldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_holding(row: &sqlx::postgres::PgRow) -> Result<GoldHolding> {
        Ok(GoldHolding {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            quantity_grams: row.try_get("quantity_grams")?,
            cost_basis_price_per_gram: row.try_get("cost_basis_price_per_gram")?,
            purchase_date: row.try_get("purchase_date")?,
        })
    }
}

#[async_trait]
impl GoldRepository for PostgresGoldRepository {
    async fn create(&self, user_id: Uuid, payload: &AddGoldRequest) -> Result<GoldHolding> {
        let holding = GoldHolding {
            id: Uuid::new_v4(),
            user_id,
            quantity_grams: payload.quantity_grams,
            cost_basis_price_per_gram: payload.cost_basis_price_per_gram,
            purchase_date: payload.purchase_date,
        };
        sqlx::query(
            "INSERT INTO gold_holdings (id, user_id, quantity_grams, cost_basis_price_per_gram, purchase_date)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(holding.id)
        .bind(holding.user_id)
        .bind(holding.quantity_grams)
        .bind(holding.cost_basis_price_per_gram)
        .bind(holding.purchase_date)
        .execute(&self.pool)
        .await?;
        Ok(holding)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GoldHolding>> {
        let rows = sqlx::query(
            "SELECT id, user_id, quantity_grams, cost_basis_price_per_gram, purchase_date
             FROM gold_holdings WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_holding).collect()
    }

    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gold_holdings WHERE id = $1 AND user_id = $2")
            .bind(holding_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
