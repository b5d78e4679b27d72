use anyhow::Result;
use async_trait::async_trait;
use domain::{AddBondRequest, BondHolding};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait BondRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, payload: &AddBondRequest) -> Result<BondHolding>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<BondHolding>>;
    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PostgresBondRepository {
    pool: PgPool,
}

impl PostgresBondRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_holding(row: &sqlx::postgres::PgRow) -> Result<BondHolding> {
        Ok(BondHolding {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            bond_name: row.try_get("bond_name")?,
            issue_date: row.try_get("issue_date")?,
            maturity_date: row.try_get("maturity_date")?,
            principal_amount: row.try_get("principal_amount")?,
            coupon_rate: row.try_get("coupon_rate")?,
        })
    }
}

#[async_trait]
impl BondRepository for PostgresBondRepository {
    async fn create(&self, user_id: Uuid, payload: &AddBondRequest) -> Result<BondHolding> {
        let holding = BondHolding {
            id: Uuid::new_v4(),
            user_id,
            bond_name: payload.bond_name.trim().to_string(),
            issue_date: payload.issue_date,
            maturity_date: payload.maturity_date,
            principal_amount: payload.principal_amount,
            coupon_rate: payload.coupon_rate,
        };
        sqlx::query(
            "INSERT INTO bond_holdings (id, user_id, bond_name, issue_date, maturity_date, principal_amount, coupon_rate)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(holding.id)
        .bind(holding.user_id)
        .bind(&holding.bond_name)
        .bind(holding.issue_date)
        .bind(holding.maturity_date)
        .bind(holding.principal_amount)
        .bind(holding.coupon_rate)
        .execute(&self.pool)
        .await?;
        Ok(holding)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<BondHolding>> {
        let rows = sqlx::query(
            "SELECT id, user_id, bond_name, issue_date, maturity_date, principal_amount, coupon_rate
             FROM bond_holdings WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_holding).collect()
    }

    async fn delete(&self, user_id: Uuid, holding_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bond_holdings WHERE id = $1 AND user_id = $2")
            .bind(holding_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
