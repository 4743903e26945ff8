//! Authentication module
//!
//! Password hashing, token issuance and the register / login / logout /
//! refresh flow, plus the HTTP handlers and cookies that expose it.

pub mod cookies;
pub mod handlers;
pub mod password;
pub mod service;
pub mod tokens;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{AuthService, AuthSession, LoginInput, RegisterInput};
pub use tokens::{Claims, JwtTokenIssuer, TokenIssuer, TokenKind, TokenPair};
