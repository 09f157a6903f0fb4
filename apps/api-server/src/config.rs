//! Application configuration loaded from environment variables.

use std::collections::HashSet;
use std::env;

use chronicle_infra::database::DatabaseConfig;

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Accounts that receive the `admin` role, lowercased.
    pub admin_emails: HashSet<String>,
    pub rate_limit_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let database = DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

/// Parse a comma-separated list of admin email addresses.
fn parse_admin_emails(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_emails_are_trimmed_and_lowercased() {
        let emails = parse_admin_emails(" Admin@Example.com , editor@example.com ");
        assert!(emails.contains("admin@example.com"));
        assert!(emails.contains("editor@example.com"));
        assert_eq!(emails.len(), 2);
    }

    #[test]
    fn empty_list_parses_to_nothing() {
        assert!(parse_admin_emails("").is_empty());
        assert!(parse_admin_emails(" , ,").is_empty());
    }
}
