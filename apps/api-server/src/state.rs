//! Application state - shared across all handlers.

use std::collections::HashSet;
use std::sync::Arc;

use chronicle_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use chronicle_infra::database::{
    self, DatabaseConfig, DbErr, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository,
};
use sea_orm::SqlxPostgresConnector;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub comments: Arc<dyn CommentRepository>,
    admin_emails: Arc<HashSet<String>>,
}

impl AppState {
    /// Connect to the database and build the repository set.
    pub async fn new(
        db_config: &DatabaseConfig,
        admin_emails: HashSet<String>,
    ) -> Result<Self, DbErr> {
        let conn = database::connect(db_config).await?;

        // Hand each repository its own handle to the shared connection pool.
        // We reconstruct handles from the underlying sqlx pool rather than
        // `conn.clone()`: `DatabaseConnection` only derives `Clone` when the
        // `mock` feature is absent, and that feature gets unified into this
        // crate's build during `cargo test`. Cloning the pool is equivalent —
        // every handle shares the same pool.
        let pool = conn.get_postgres_connection_pool().clone();

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone()),
            )),
            posts: Arc::new(PostgresPostRepository::new(
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone()),
            )),
            categories: Arc::new(PostgresCategoryRepository::new(
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone()),
            )),
            locations: Arc::new(PostgresLocationRepository::new(
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone()),
            )),
            comments: Arc::new(PostgresCommentRepository::new(
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool),
            )),
            admin_emails: Arc::new(admin_emails),
        })
    }

    /// JWT roles for an account.
    pub fn roles_for(&self, email: &str) -> Vec<String> {
        roles_for(&self.admin_emails, email)
    }
}

/// Everyone is `user`; configured addresses also get `admin`.
fn roles_for(admin_emails: &HashSet<String>, email: &str) -> Vec<String> {
    let mut roles = vec!["user".to_string()];
    if admin_emails.contains(&email.to_lowercase()) {
        roles.push("admin".to_string());
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_emails_get_admin_role() {
        let admins: HashSet<String> = ["root@example.com".to_string()].into_iter().collect();
        assert_eq!(roles_for(&admins, "Root@Example.com"), vec!["user", "admin"]);
        assert_eq!(roles_for(&admins, "user@example.com"), vec!["user"]);
    }
}
