//! Access and refresh token signing.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::db::models::User;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,      // User ID
    pub username: String, // User's full name
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn cookie_name(&self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies the two token kinds.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, kind: TokenKind, user: &User) -> Result<String, AppError>;

    /// Fails closed: bad signature, wrong kind and expiry are all errors.
    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, AppError>;

    fn ttl(&self, kind: TokenKind) -> Duration;

    fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, user)?,
            refresh_token: self.issue(TokenKind::Refresh, user)?,
        })
    }
}

struct SigningKey {
    secret: String,
    ttl: Duration,
}

/// HS256 JWTs with a distinct secret and lifetime per token kind.
pub struct JwtTokenIssuer {
    access: SigningKey,
    refresh: SigningKey,
}

impl JwtTokenIssuer {
    pub fn new(
        access_secret: String,
        access_ttl: Duration,
        refresh_secret: String,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: SigningKey { secret: access_secret, ttl: access_ttl },
            refresh: SigningKey { secret: refresh_secret, ttl: refresh_ttl },
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.access_token_secret.clone(),
            Duration::minutes(config.access_token_expiry_minutes),
            config.refresh_token_secret.clone(),
            Duration::days(config.refresh_token_expiry_days),
        )
    }

    fn key(&self, kind: TokenKind) -> &SigningKey {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, kind: TokenKind, user: &User) -> Result<String, AppError> {
        let key = self.key(kind);
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.fullname.clone(),
            exp: (now + key.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(key.secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.key(kind).secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims)
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        self.key(kind).ttl
    }
}
