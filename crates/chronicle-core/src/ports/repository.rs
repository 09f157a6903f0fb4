//! Repository ports - persistence seams for each aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, CommentView, Location, Post, PostView, User};
use crate::error::RepoError;
use crate::ports::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are distinct: entity ids are generated in the
/// domain layer, so an upsert-style `save` could not tell a create from
/// an edit of a missing row.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with account lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository - CRUD plus the read-model queries behind every listing.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// A single post joined with author/category/location, without any
    /// visibility filtering (callers apply `PostView::is_visible_to`).
    async fn find_view(&self, id: Uuid) -> Result<Option<PostView>, RepoError>;

    /// The public feed: visible posts only, newest publication first.
    async fn page_feed(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError>;

    /// Visible posts filed under one category, newest publication first.
    async fn page_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError>;

    /// Posts by one author, newest publication first. With
    /// `visible_only_at` set, the visibility filter is applied as of that
    /// instant; `None` returns everything (the author's own view).
    async fn page_by_author(
        &self,
        author_id: Uuid,
        visible_only_at: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn list_published(&self) -> Result<Vec<Category>, RepoError>;
}

/// Location repository.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {
    async fn list_published(&self) -> Result<Vec<Location>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// All comments on a post with their authors, newest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentView>, RepoError>;
}
