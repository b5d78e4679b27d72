use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use domain::{LoginRequest, SignupRequest, User};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub jwt_issuer: String,
    pub token_ttl: ChronoDuration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret".to_string(),
            jwt_audience: "portfolio".to_string(),
            jwt_issuer: "portfolio-api".to_string(),
            token_ttl: ChronoDuration::hours(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("internal error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub user_id: Uuid,
}

/// A signed-in user together with the session token the HTTP layer should
/// hand back (the api crate decides cookie vs. body placement).
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn signup(&self, payload: SignupRequest) -> AuthResult<AuthenticatedSession>;
    async fn login(&self, payload: LoginRequest) -> AuthResult<AuthenticatedSession>;
    /// Decode the token and confirm the account behind it still exists.
    async fn validate_token(&self, token: &str) -> AuthResult<User>;
}

#[derive(Clone)]
pub struct PasswordAuthService {
    config: AuthConfig,
    pool: PgPool,
}

impl PasswordAuthService {
    pub fn new(config: AuthConfig, pool: PgPool) -> Self {
        Self { config, pool }
    }

    async fn find_user_by_email(&self, email: &str) -> AuthResult<Option<(User, String)>> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, password_hash FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| AuthError::Internal(format!("failed to load user: {err}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = user_from_row(&row)?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|err| AuthError::Internal(format!("invalid user row: {err}")))?;
        Ok(Some((user, password_hash)))
    }

    async fn find_user_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, phone FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| AuthError::Internal(format!("failed to load user: {err}")))?;
        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn insert_user(&self, payload: &SignupRequest, password_hash: &str) -> AuthResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            phone: payload.phone.trim().to_string(),
        };

        sqlx::query(
            "INSERT INTO users (id, name, email, phone, password_hash) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Internal(format!("failed to insert user: {err}")),
        })?;

        Ok(user)
    }

    fn session_for(&self, user: User) -> AuthResult<AuthenticatedSession> {
        let token = build_jwt(&self.config, &user)?;
        Ok(AuthenticatedSession { user, token })
    }
}

#[async_trait]
impl AuthService for PasswordAuthService {
    async fn signup(&self, payload: SignupRequest) -> AuthResult<AuthenticatedSession> {
        validate_signup(&payload)?;

        if self.find_user_by_email(&payload.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&payload.password)?;
        let user = self.insert_user(&payload, &password_hash).await?;
        debug!("signup ok email={}", user.email);
        self.session_for(user)
    }

    async fn login(&self, payload: LoginRequest) -> AuthResult<AuthenticatedSession> {
        let Some((user, password_hash)) = self.find_user_by_email(&payload.email).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        verify_password(&payload.password, &password_hash)?;
        debug!("login ok email={}", user.email);
        self.session_for(user)
    }

    async fn validate_token(&self, token: &str) -> AuthResult<User> {
        let claims = decode_jwt(&self.config, token)?;
        self.find_user_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> AuthResult<User> {
    Ok(User {
        id: row
            .try_get("id")
            .map_err(|err| AuthError::Internal(format!("invalid user row: {err}")))?,
        name: row
            .try_get("name")
            .map_err(|err| AuthError::Internal(format!("invalid user row: {err}")))?,
        email: row
            .try_get("email")
            .map_err(|err| AuthError::Internal(format!("invalid user row: {err}")))?,
        phone: row
            .try_get("phone")
            .map_err(|err| AuthError::Internal(format!("invalid user row: {err}")))?,
    })
}

fn validate_signup(payload: &SignupRequest) -> AuthResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AuthError::Validation("name is required".into()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AuthError::Validation("a valid email is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AuthError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Internal(format!("failed to hash password: {err}")))
}

fn verify_password(password: &str, stored_hash: &str) -> AuthResult<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| AuthError::Internal(format!("corrupt password hash: {err}")))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

fn build_jwt(config: &AuthConfig, user: &User) -> AuthResult<String> {
    let issued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| AuthError::Internal(format!("time error: {err}")))?;
    let iat = issued_at.as_secs() as usize;
    // Signed arithmetic: a negative TTL must yield an already-expired exp,
    // not wrap around to the far future.
    let exp = (iat as i64)
        .saturating_add(config.token_ttl.num_seconds())
        .max(0) as usize;

    let claims = JwtClaims {
        sub: user.email.clone(),
        aud: config.jwt_audience.clone(),
        iss: config.jwt_issuer.clone(),
        exp,
        iat,
        user_id: user.id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|err| AuthError::Internal(format!("failed to encode jwt: {err}")))
}

fn decode_jwt(config: &AuthConfig, token: &str) -> AuthResult<JwtClaims> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.clone()]);
    validation.iss = Some(
        std::iter::once(config.jwt_issuer.clone()).collect::<HashSet<String>>(),
    );

    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn jwt_roundtrip_carries_identity() {
        let config = AuthConfig::default();
        let user = sample_user();
        let token = build_jwt(&config, &user).unwrap();
        let claims = decode_jwt(&config, &token).unwrap();
        assert_eq!(claims.sub, user.email);
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.aud, config.jwt_audience);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let config = AuthConfig::default();
        let token = build_jwt(&config, &sample_user()).unwrap();
        let other = AuthConfig {
            jwt_secret: "different-secret".to_string(),
            ..AuthConfig::default()
        };
        assert!(matches!(
            decode_jwt(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn jwt_rejects_expired_token() {
        let config = AuthConfig {
            token_ttl: ChronoDuration::seconds(-120),
            ..AuthConfig::default()
        };
        let token = build_jwt(&config, &sample_user()).unwrap();
        assert!(matches!(
            decode_jwt(&config, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn jwt_rejects_wrong_audience() {
        let config = AuthConfig::default();
        let token = build_jwt(&config, &sample_user()).unwrap();
        let other = AuthConfig {
            jwt_audience: "someone-else".to_string(),
            ..AuthConfig::default()
        };
        assert!(matches!(
            decode_jwt(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn signup_validation_rejects_bad_input() {
        let base = SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            password: "long enough".to_string(),
        };

        let no_name = SignupRequest {
            name: "  ".to_string(),
            ..clone_signup(&base)
        };
        assert!(matches!(
            validate_signup(&no_name),
            Err(AuthError::Validation(_))
        ));

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..clone_signup(&base)
        };
        assert!(matches!(
            validate_signup(&bad_email),
            Err(AuthError::Validation(_))
        ));

        let short_password = SignupRequest {
            password: "short".to_string(),
            ..clone_signup(&base)
        };
        assert!(matches!(
            validate_signup(&short_password),
            Err(AuthError::Validation(_))
        ));

        assert!(validate_signup(&base).is_ok());
    }

    fn clone_signup(req: &SignupRequest) -> SignupRequest {
        SignupRequest {
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            password: req.password.clone(),
        }
    }
}
