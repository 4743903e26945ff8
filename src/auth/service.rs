//! Register / login / logout / refresh orchestration.
//!
//! A client session moves through these states, none of which are stored
//! server-side:
//!
//! - `Anonymous` to `Authenticated` on register or login (both tokens issued)
//! - `Authenticated` to `AccessExpired` when the access token lapses
//! - `AccessExpired` back to `Authenticated` through [`AuthService::refresh_token`]
//! - any state to `Anonymous` on logout, or once the refresh token is
//!   rejected or expired

use std::sync::Arc;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::auth::tokens::{Claims, TokenIssuer, TokenKind, TokenPair};
use crate::db::models::{NewUser, User};
use crate::db::store::CredentialStore;
use crate::error::{AppError, AuthError, DatabaseError};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const LOGOUT_MESSAGE: &str = "User is logged out";

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub fullname: String,
    pub email: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

impl RegisterInput {
    pub fn new(fullname: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            fullname: fullname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.fullname.trim().is_empty() {
            return Err(AppError::ValidationError("Fullname is required".into()));
        }
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if self.password != self.confirm_password {
            return Err(AppError::ValidationError(
                "Password and confirmPassword does not match".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// A user together with freshly issued tokens.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError("Email must be a valid email address".into()))
    }
}

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub fn token_issuer(&self) -> &dyn TokenIssuer {
        self.tokens.as_ref()
    }

    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AppError> {
        input.validate()?;

        if self.store.find_by_email(&input.email).await?.is_some() {
            warn!("Registration rejected, email already in use: {}", input.email);
            return Err(email_in_use());
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let new_user = NewUser::new(input.fullname, input.email, password_hash);

        let user = match self.store.create(new_user).await {
            Ok(user) => user,
            // Lost a race against a concurrent registration of the same email.
            Err(AppError::DatabaseError(DatabaseError::Duplicate)) => return Err(email_in_use()),
            Err(e) => {
                error!("Failed to create user: {}", e);
                return Err(e);
            }
        };

        info!("Registered user {}", user.id);
        self.issue_session(user)
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AppError> {
        let user = match self.store.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                warn!("Login failed, unknown email: {}", input.email);
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(&input.password, &user.password)? {
            warn!("Login failed, wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        info!("User {} logged in", user.id);
        self.issue_session(user)
    }

    /// Tokens are stateless, so there is nothing to revoke here; the
    /// transport clears the cookies.
    pub fn logout(&self) -> &'static str {
        LOGOUT_MESSAGE
    }

    /// Mints a new access token from a presented refresh token.
    pub async fn refresh_token(&self, presented: Option<&str>) -> Result<String, AppError> {
        let token = match presented {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingRefreshToken.into()),
        };

        let claims = match self.tokens.verify(TokenKind::Refresh, token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Refresh token rejected: {}", e);
                return Err(e);
            }
        };

        let user = self.user_for(&claims).await?;
        let access_token = self.tokens.issue(TokenKind::Access, &user)?;

        info!("Issued new access token for user {}", user.id);
        Ok(access_token)
    }

    pub fn hello(&self) -> &'static str {
        "Hello"
    }

    async fn user_for(&self, claims: &Claims) -> Result<User, AppError> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ValidationError("User does not exist".into()))
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, AppError> {
        let tokens = self.tokens.issue_pair(&user)?;
        Ok(AuthSession { user, tokens })
    }
}

fn email_in_use() -> AppError {
    AppError::ConflictError("The email is already in use, try another".into())
}
