use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry.
///
/// `pub_date` may lie in the future: such a post is "scheduled" and stays
/// hidden from everyone but its author until the date passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new published post. `pub_date` defaults to now when absent.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: None,
            location_id: None,
            title,
            text,
            image_url: None,
            pub_date: pub_date.unwrap_or(now),
            is_published: true,
            created_at: now,
        }
    }

    /// Whether the post is scheduled for future publication.
    pub fn is_scheduled(&self, now: DateTime<Utc>) -> bool {
        self.pub_date > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn pub_date_defaults_to_creation_time() {
        let post = Post::new(Uuid::new_v4(), "t".into(), "x".into(), None);
        assert!(!post.is_scheduled(Utc::now() + TimeDelta::seconds(1)));
    }

    #[test]
    fn future_pub_date_marks_post_scheduled() {
        let now = Utc::now();
        let post = Post::new(
            Uuid::new_v4(),
            "t".into(),
            "x".into(),
            Some(now + TimeDelta::days(1)),
        );
        assert!(post.is_scheduled(now));
        assert!(!post.is_scheduled(now + TimeDelta::days(2)));
    }
}
