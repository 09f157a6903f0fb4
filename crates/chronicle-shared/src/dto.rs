//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Auth & accounts

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// The caller's own account, email included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request to update the caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A user as shown on their public profile page - no email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Posts

/// Request body for creating or editing a post.
///
/// On create, a missing `pub_date` means "now"; on edit it means
/// "keep the current date".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A post's author as embedded in post and comment payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRefDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRefDto {
    pub id: Uuid,
    pub name: String,
}

/// A post as returned by listings and mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author: AuthorDto,
    pub category: Option<CategoryRefDto>,
    pub location: Option<LocationRefDto>,
}

/// A post detail page: the post plus its comments, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

// ---------------------------------------------------------------------------
// Comments

/// Request body for adding or editing a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorDto,
}

// ---------------------------------------------------------------------------
// Categories & locations

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin request to create or edit a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// Admin request to create or edit a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// Admin request to flip a post's published flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPublishedRequest {
    pub is_published: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_optionals_default_to_none() {
        let req: PostRequest = serde_json::from_str(r#"{"title":"t","text":"x"}"#).unwrap();
        assert!(req.pub_date.is_none());
        assert!(req.category_id.is_none());
        assert!(req.location_id.is_none());
        assert!(req.image_url.is_none());
    }

    #[test]
    fn category_request_defaults_to_published() {
        let req: CategoryRequest =
            serde_json::from_str(r#"{"title":"T","description":"d","slug":"t"}"#).unwrap();
        assert!(req.is_published);
    }

    #[test]
    fn post_detail_flattens_post_fields() {
        let detail = PostDetailResponse {
            post: PostResponse {
                id: Uuid::nil(),
                title: "t".into(),
                text: "x".into(),
                image_url: None,
                pub_date: Utc::now(),
                is_published: true,
                created_at: Utc::now(),
                author: AuthorDto {
                    id: Uuid::nil(),
                    username: "a".into(),
                },
                category: None,
                location: None,
            },
            comments: vec![],
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["title"], "t");
        assert!(value["comments"].as_array().unwrap().is_empty());
        assert!(value.get("image_url").is_none());
    }
}
