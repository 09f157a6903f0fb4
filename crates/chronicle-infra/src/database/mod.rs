//! Database connection management and SeaORM repositories.

mod connections;
pub mod entity;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::DbErr;
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
