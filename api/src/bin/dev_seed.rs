use std::env;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use rust_decimal_macros::dec;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("../migrations").run(&pool).await?;

    let email = env::var("DEV_SEED_EMAIL").unwrap_or_else(|_| "demo@example.com".to_string());
    let password = env::var("DEV_SEED_PASSWORD").unwrap_or_else(|_| "demo-password".to_string());

    seed_demo(&pool, &email, &password).await?;
    println!("Seeded demo portfolio for {email} (dev only).");
    Ok(())
}

async fn seed_demo(pool: &PgPool, email: &str, password: &str) -> Result<()> {
    let user_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, b"portfolio-dev-user");
    let password_hash =
        auth::hash_password(password).map_err(|err| anyhow::anyhow!("hash failed: {err}"))?;

    let mut tx = pool.begin().await?;

    // Clean previous dev seed data so reruns stay stable.
    for table in [
        "stock_holdings",
        "gold_holdings",
        "cash_holdings",
        "bond_holdings",
    ] {
        sqlx::query(&format!("DELETE FROM {table} WHERE user_id = $1"))
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query(
        "INSERT INTO users (id, name, email, phone, password_hash)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, password_hash = EXCLUDED.password_hash",
    )
    .bind(user_id)
    .bind("Demo User")
    .bind(email)
    .bind("555-0100")
    .bind(&password_hash)
    .execute(&mut *tx)
    .await?;

    let today = Local::now().date_naive();

    let stocks = [
        ("AAPL", dec!(165.20), dec!(12)),
        ("MSFT", dec!(310.00), dec!(6)),
        ("VTI", dec!(215.50), dec!(20)),
    ];
    for (symbol, cost, qty) in stocks {
        sqlx::query(
            "INSERT INTO stock_holdings (id, user_id, symbol, cost_basis_price, quantity)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(symbol)
        .bind(cost)
        .bind(qty)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO gold_holdings (id, user_id, quantity_grams, cost_basis_price_per_gram, purchase_date)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(dec!(50))
    .bind(dec!(62.40))
    .bind(today - Duration::days(400))
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO cash_holdings (id, user_id, amount, monthly_interest_rate, start_date, kind, bank)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(dec!(15000))
    .bind(dec!(0.35))
    .bind(today - Duration::days(300))
    .bind("savings")
    .bind("First National")
    .execute(&mut *tx)
    .await?;

    let issue: NaiveDate = today - Duration::days(700);
    sqlx::query(
        "INSERT INTO bond_holdings (id, user_id, bond_name, issue_date, maturity_date, principal_amount, coupon_rate)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind("Treasury 10Y")
    .bind(issue)
    .bind(issue + Duration::days(3650))
    .bind(dec!(10000))
    .bind(dec!(4.25))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
