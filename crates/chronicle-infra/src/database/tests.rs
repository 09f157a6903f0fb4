#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::database::entity::{category, post, user};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use chronicle_core::domain::Post;
    use chronicle_core::error::RepoError;
    use chronicle_core::ports::{BaseRepository, CategoryRepository, UserRepository};

    #[tokio::test]
    async fn find_post_by_id_maps_model() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                category_id: None,
                location_id: None,
                title: "Test Post".to_owned(),
                text: "Content".to_owned(),
                image_url: None,
                pub_date: now.into(),
                is_published: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
        assert!(post.category_id.is_none());
    }

    #[tokio::test]
    async fn find_user_by_email_maps_model() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                email: "alice@example.com".to_owned(),
                first_name: "Alice".to_owned(),
                last_name: String::new(),
                password_hash: "$argon2id$stub".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.first_name, "Alice");
    }

    #[tokio::test]
    async fn list_published_categories_maps_models() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: uuid::Uuid::new_v4(),
                title: "Travel".to_owned(),
                description: "On the road".to_owned(),
                slug: "travel".to_owned(),
                is_published: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let categories = repo.list_published().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "travel");
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Result<(), _> =
            BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
