use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum username length.
pub const USERNAME_MAX_LEN: usize = 150;

/// User entity - an account that authors posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Usernames: 1..=150 chars of letters, digits and `_ . @ + -`.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= USERNAME_MAX_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_42"));
        assert!(is_valid_username("name.with+mail@host"));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username(&"a".repeat(USERNAME_MAX_LEN + 1)));
    }

    #[test]
    fn rejects_whitespace_and_symbols() {
        assert!(!is_valid_username("two words"));
        assert!(!is_valid_username("semi;colon"));
        assert!(!is_valid_username("slash/name"));
    }
}
