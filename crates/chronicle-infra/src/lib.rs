//! # Chronicle Infrastructure
//!
//! Concrete implementations of the ports defined in `chronicle-core`:
//! PostgreSQL repositories via SeaORM, JWT + Argon2 authentication, and
//! an in-memory rate limiter.

pub mod auth;
pub mod database;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository, connect,
};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
