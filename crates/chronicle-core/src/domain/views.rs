//! Read models - posts and comments joined with the rows they reference.
//!
//! Repositories return these for anything that ends up on a page, so
//! handlers never chase foreign keys themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The author of a post or comment, reduced to what listings display.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationRef {
    pub id: Uuid,
    pub name: String,
}

/// A post together with its author, category and location.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author: AuthorRef,
    pub category: Option<CategoryRef>,
    pub location: Option<LocationRef>,
}

impl PostView {
    /// The visibility filter: whether a non-author may see this post.
    ///
    /// Requires the post to be published, its publication date to have
    /// passed, and its category to exist and itself be published. The
    /// location's published flag does not participate.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published
            && self.pub_date <= now
            && self.category.as_ref().is_some_and(|c| c.is_published)
    }

    /// Whether `viewer` may see this post: the author always may, anyone
    /// else only when the visibility filter passes.
    pub fn is_visible_to(&self, viewer: Option<Uuid>, now: DateTime<Utc>) -> bool {
        viewer == Some(self.author.id) || self.is_visible_at(now)
    }
}

/// A comment together with its author.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn view(is_published: bool, pub_date: DateTime<Utc>, category: Option<CategoryRef>) -> PostView {
        PostView {
            id: Uuid::new_v4(),
            title: "title".into(),
            text: "text".into(),
            image_url: None,
            pub_date,
            is_published,
            created_at: pub_date,
            author: AuthorRef {
                id: Uuid::new_v4(),
                username: "author".into(),
            },
            category,
            location: None,
        }
    }

    fn category(is_published: bool) -> CategoryRef {
        CategoryRef {
            id: Uuid::new_v4(),
            title: "Travel".into(),
            slug: "travel".into(),
            is_published,
        }
    }

    #[test]
    fn published_post_in_published_category_is_visible() {
        let now = Utc::now();
        let post = view(true, now - TimeDelta::hours(1), Some(category(true)));
        assert!(post.is_visible_at(now));
    }

    #[test]
    fn unpublished_post_is_hidden() {
        let now = Utc::now();
        let post = view(false, now - TimeDelta::hours(1), Some(category(true)));
        assert!(!post.is_visible_at(now));
    }

    #[test]
    fn scheduled_post_is_hidden_until_pub_date() {
        let now = Utc::now();
        let post = view(true, now + TimeDelta::hours(1), Some(category(true)));
        assert!(!post.is_visible_at(now));
        assert!(post.is_visible_at(now + TimeDelta::hours(2)));
    }

    #[test]
    fn unpublished_category_hides_post() {
        let now = Utc::now();
        let post = view(true, now - TimeDelta::hours(1), Some(category(false)));
        assert!(!post.is_visible_at(now));
    }

    #[test]
    fn uncategorized_post_is_never_publicly_visible() {
        let now = Utc::now();
        let post = view(true, now - TimeDelta::hours(1), None);
        assert!(!post.is_visible_at(now));
    }

    #[test]
    fn author_sees_own_hidden_post() {
        let now = Utc::now();
        let post = view(false, now + TimeDelta::days(1), None);
        let author = post.author.id;
        assert!(post.is_visible_to(Some(author), now));
        assert!(!post.is_visible_to(Some(Uuid::new_v4()), now));
        assert!(!post.is_visible_to(None, now));
    }
}
