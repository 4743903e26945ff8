//! Credential storage.
//!
//! `CredentialStore` is the seam the auth flow depends on; Postgres and
//! in-memory implementations live alongside it.

pub mod memory;
pub mod models;
pub mod operations;
pub mod store;

pub use memory::InMemoryCredentialStore;
pub use models::{NewUser, User};
pub use operations::PgCredentialStore;
pub use store::CredentialStore;
