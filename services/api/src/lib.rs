//! Bestiary API
//!
//! REST service over the Bestiary records: users, their profiles and the enemy
//! catalogue. Every write goes through `bestiary-validation` before it reaches
//! the in-memory store; rejections come back as `{message, code}` JSON.

#![recursion_limit = "256"]

pub mod enemies;
pub mod error;
pub mod password;
pub mod profiles;
pub mod routes;
pub mod server;
pub mod state;
pub mod users;

pub use error::{ApiError, Result};
pub use password::{BcryptHasher, PasswordHasher};
pub use routes::routes;
pub use server::ApiServer;
pub use state::AppState;
