//! PostgreSQL repository implementations.
//!
//! Listing queries return read models (`PostView`, `CommentView`) built
//! from one joined select, so a page of posts costs two queries (count +
//! fetch) regardless of page size.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use chronicle_core::domain::{
    AuthorRef, Category, CategoryRef, CommentView, Location, LocationRef, PostView, User,
};
use chronicle_core::error::RepoError;
use chronicle_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, Page, PageRequest, PostRepository,
    UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Mask an email address for logging - PII stays out of the logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let head: String = local.chars().take(1).collect();
            format!("{}***@{}", head, domain)
        }
        _ => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

/// Row shape of the joined post select.
#[derive(Debug, FromQueryResult)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    category_id: Option<Uuid>,
    location_id: Option<Uuid>,
    title: String,
    text: String,
    image_url: Option<String>,
    pub_date: DateTimeWithTimeZone,
    is_published: bool,
    created_at: DateTimeWithTimeZone,
    author_username: String,
    category_title: Option<String>,
    category_slug: Option<String>,
    category_is_published: Option<bool>,
    location_name: Option<String>,
}

impl From<PostRow> for PostView {
    fn from(row: PostRow) -> Self {
        let category = row.category_id.map(|id| CategoryRef {
            id,
            title: row.category_title.unwrap_or_default(),
            slug: row.category_slug.unwrap_or_default(),
            is_published: row.category_is_published.unwrap_or(false),
        });
        let location = row.location_id.map(|id| LocationRef {
            id,
            name: row.location_name.unwrap_or_default(),
        });

        PostView {
            id: row.id,
            title: row.title,
            text: row.text,
            image_url: row.image_url,
            pub_date: row.pub_date.into(),
            is_published: row.is_published,
            created_at: row.created_at.into(),
            author: AuthorRef {
                id: row.author_id,
                username: row.author_username,
            },
            category,
            location,
        }
    }
}

/// Posts joined with author (inner) and category/location (left), with the
/// referenced display columns aliased in.
fn post_view_select() -> Select<PostEntity> {
    PostEntity::find()
        .join(JoinType::InnerJoin, post::Relation::Author.def())
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .join(JoinType::LeftJoin, post::Relation::Location.def())
        .column_as(user::Column::Username, "author_username")
        .column_as(category::Column::Title, "category_title")
        .column_as(category::Column::Slug, "category_slug")
        .column_as(category::Column::IsPublished, "category_is_published")
        .column_as(location::Column::Name, "location_name")
}

/// The visibility filter in SQL form: published post, publication date
/// passed, category present and published. The left-joined category columns
/// are NULL for uncategorized posts, so the equality filter drops them.
fn only_visible(query: Select<PostEntity>, now: DateTime<Utc>) -> Select<PostEntity> {
    query
        .filter(post::Column::IsPublished.eq(true))
        .filter(post::Column::PubDate.lte(now))
        .filter(category::Column::IsPublished.eq(true))
}

impl PostgresBaseRepository<PostEntity> {
    async fn page_views(
        &self,
        query: Select<PostEntity>,
        req: PageRequest,
    ) -> Result<Page<PostView>, RepoError> {
        let paginator = query
            .order_by_desc(post::Column::PubDate)
            .into_model::<PostRow>()
            .paginate(&self.db, req.per_page);

        let counts = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let page = req.clamp_to(counts.number_of_pages);
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            page,
            per_page: req.per_page,
            total_items: counts.number_of_items,
            total_pages: counts.number_of_pages.max(1),
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_view(&self, id: Uuid) -> Result<Option<PostView>, RepoError> {
        let row = post_view_select()
            .filter(post::Column::Id.eq(id))
            .into_model::<PostRow>()
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn page_feed(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError> {
        self.page_views(only_visible(post_view_select(), now), page)
            .await
    }

    async fn page_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError> {
        let query = only_visible(post_view_select(), now)
            .filter(post::Column::CategoryId.eq(category_id));
        self.page_views(query, page).await
    }

    async fn page_by_author(
        &self,
        author_id: Uuid,
        visible_only_at: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Page<PostView>, RepoError> {
        let mut query = post_view_select().filter(post::Column::AuthorId.eq(author_id));
        if let Some(now) = visible_only_at {
            query = only_visible(query, now);
        }
        self.page_views(query, page).await
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_published(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::IsPublished.eq(true))
            .order_by_asc(category::Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn list_published(&self) -> Result<Vec<Location>, RepoError> {
        let result = LocationEntity::find()
            .filter(location::Column::IsPublished.eq(true))
            .order_by_asc(location::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Row shape of the joined comment select.
#[derive(Debug, FromQueryResult)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTimeWithTimeZone,
    author_username: String,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        CommentView {
            id: row.id,
            post_id: row.post_id,
            text: row.text,
            created_at: row.created_at.into(),
            author: AuthorRef {
                id: row.author_id,
                username: row.author_username,
            },
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentView>, RepoError> {
        let rows = CommentEntity::find()
            .join(JoinType::InnerJoin, comment::Relation::Author.def())
            .column_as(user::Column::Username, "author_username")
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .into_model::<CommentRow>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn mask_keeps_only_first_char_and_domain() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
