//! HTTP-only session cookies.

use actix_web::cookie::{time, Cookie, SameSite};

use crate::auth::tokens::TokenKind;
use crate::config::CookieConfig;

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// Cookie carrying a token of `kind`, living as long as the token does.
pub fn token_cookie(
    kind: TokenKind,
    token: String,
    ttl: chrono::Duration,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build(kind.cookie_name(), token)
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .path(config.path.clone())
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .finish()
}

/// Cookie that tells the browser to drop the token of `kind`.
pub fn removal_cookie(kind: TokenKind, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(kind.cookie_name(), "")
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .path(config.path.clone())
        .finish();
    cookie.make_removal();
    cookie
}
