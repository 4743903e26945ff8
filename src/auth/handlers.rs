use actix_web::{web, HttpResponse, HttpRequest, HttpResponseBuilder};
use serde::Serialize;
use crate::AppState;
use crate::auth::cookies::{removal_cookie, token_cookie};
use crate::auth::service::{AuthSession, LoginInput, RegisterInput};
use crate::auth::tokens::TokenKind;
use crate::db::models::User;
use crate::error::AppError;
use tracing::{info, error};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

fn respond_with_session(
    mut builder: HttpResponseBuilder,
    session: AuthSession,
    state: &AppState,
) -> HttpResponse {
    let issuer = state.auth_service.token_issuer();
    let cookies = &state.config.cookies;

    builder
        .cookie(token_cookie(
            TokenKind::Access,
            session.tokens.access_token,
            issuer.ttl(TokenKind::Access),
            cookies,
        ))
        .cookie(token_cookie(
            TokenKind::Refresh,
            session.tokens.refresh_token,
            issuer.ttl(TokenKind::Refresh),
            cookies,
        ))
        .json(UserResponse { user: session.user })
}

pub async fn register(
    req: web::Json<RegisterInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = req.into_inner();
    let email = input.email.clone();
    info!("Received registration request for email: {}", email);

    match state.auth_service.register(input).await {
        Ok(session) => {
            info!("Registration successful for email: {}", email);
            Ok(respond_with_session(HttpResponse::Created(), session, &state))
        }
        Err(e) => {
            error!("Registration failed for email: {}: {}", email, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = req.into_inner();
    let email = input.email.clone();
    info!("Received login request for email: {}", email);

    match state.auth_service.login(input).await {
        Ok(session) => {
            info!("Login successful for email: {}", email);
            Ok(respond_with_session(HttpResponse::Ok(), session, &state))
        }
        Err(e) => {
            error!("Login failed for email: {}: {}", email, e);
            Err(e)
        }
    }
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let cookies = &state.config.cookies;
    let message = state.auth_service.logout();

    HttpResponse::Ok()
        .cookie(removal_cookie(TokenKind::Access, cookies))
        .cookie(removal_cookie(TokenKind::Refresh, cookies))
        .json(serde_json::json!({ "message": message }))
}

pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let presented = req.cookie(TokenKind::Refresh.cookie_name());
    let access_token = state
        .auth_service
        .refresh_token(presented.as_ref().map(|c| c.value()))
        .await?;

    let ttl = state.auth_service.token_issuer().ttl(TokenKind::Access);
    Ok(HttpResponse::Ok()
        .cookie(token_cookie(
            TokenKind::Access,
            access_token.clone(),
            ttl,
            &state.config.cookies,
        ))
        .json(RefreshResponse { access_token }))
}

pub async fn hello(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.auth_service.hello())
}
