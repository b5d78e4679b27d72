use std::{env, time::Duration};

use anyhow::{Context, Result};
use axum_extra::extract::cookie::SameSite;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub jwt_issuer: String,
    pub frontend_origins: Vec<String>,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub session_ttl: Duration,
    pub quote_api_base: String,
    pub quote_timeout: Duration,
    pub quote_cache_ttl: Duration,
    pub quote_max_concurrency: usize,
    pub performance_days: u32,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let session_ttl = parse_duration_seconds("SESSION_TTL_SECS", 3600);
        let quote_timeout = parse_duration_seconds("QUOTE_TIMEOUT_SECS", 4);
        let quote_cache_ttl = parse_duration_seconds("QUOTE_CACHE_TTL_SECS", 5);
        let quote_max_concurrency = parse_usize("QUOTE_MAX_CONCURRENCY", 8);
        let performance_days = parse_usize("PERFORMANCE_DAYS", 30) as u32;
        let frontend_origins = parse_origins();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string());
        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(false);

        if is_production_environment() {
            if jwt_secret == "dev-secret" {
                anyhow::bail!(
                    "JWT_SECRET is using the default 'dev-secret' in production. \
                    Anyone can forge session tokens with it; set a strong random JWT_SECRET."
                );
            }
            if jwt_secret.len() < 32 {
                eprintln!(
                    "WARNING: JWT_SECRET is only {} chars; use at least 32 in production.",
                    jwt_secret.len()
                );
            }
            if !cookie_secure {
                eprintln!(
                    "WARNING: COOKIE_SECURE=false in production. Session cookies will travel \
                    over plain HTTP; set COOKIE_SECURE=true behind HTTPS."
                );
            }
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set for API server")?,
            jwt_secret,
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "portfolio".to_string()),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "portfolio-api".to_string()),
            frontend_origins,
            cookie_secure,
            cookie_same_site: parse_same_site(&env::var("COOKIE_SAMESITE").ok()),
            session_ttl,
            quote_api_base: env::var("QUOTE_API_BASE").unwrap_or_else(|_| {
                "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
            }),
            quote_timeout,
            quote_cache_ttl,
            quote_max_concurrency,
            performance_days,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .context("PORT must be a valid u16")?,
        })
    }
}

fn is_production_environment() -> bool {
    env::var("ENVIRONMENT")
        .or_else(|_| env::var("ENV"))
        .map(|e| {
            let lower = e.to_lowercase();
            lower == "production" || lower == "prod"
        })
        .unwrap_or(false)
}

fn parse_origins() -> Vec<String> {
    if let Ok(list) = env::var("FRONTEND_ORIGINS") {
        split_origins(&list)
    } else if let Ok(origin) = env::var("FRONTEND_ORIGIN") {
        split_origins(&origin)
    } else {
        vec!["http://localhost:3000".to_string()]
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|item| {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_duration_seconds(key: &str, default: u64) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

fn parse_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_same_site(value: &Option<String>) -> SameSite {
    match value.as_ref().map(|v| v.trim().to_lowercase()).as_deref() {
        Some("strict") => SameSite::Strict,
        Some("none") => SameSite::None,
        _ => SameSite::Lax,
    }
}
