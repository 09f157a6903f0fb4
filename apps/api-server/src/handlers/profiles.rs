//! Profile handlers: public author pages and self-service profile edits.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;

use chronicle_core::domain::is_valid_username;
use chronicle_core::ports::Page;
use chronicle_shared::dto::{PostResponse, ProfileResponse, UpdateProfileRequest};

use crate::handlers::PageQuery;
use crate::handlers::auth::user_response;
use crate::handlers::posts::post_response;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
struct ProfileDetailResponse {
    profile: ProfileResponse,
    posts: Page<PostResponse>,
}

/// GET /api/profiles/{username}
///
/// The profile owner sees all of their posts, scheduled and unpublished
/// ones included; any other viewer gets only the publicly visible ones.
pub async fn detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

    let visible_only_at = if viewer.user_id() == Some(user.id) {
        None
    } else {
        Some(Utc::now())
    };

    let posts = state
        .posts
        .page_by_author(user.id, visible_only_at, query.request())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileDetailResponse {
        profile: ProfileResponse {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        },
        posts: posts.map(post_response),
    }))
}

/// PUT /api/profile - update the caller's own account.
pub async fn update_own(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if !is_valid_username(&req.username) {
        return Err(AppError::BadRequest(
            "Username may only contain letters, digits and _ . @ + -".to_string(),
        ));
    }

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    // Uniqueness pre-checks; the database constraints are the backstop.
    if req.username != user.username
        && state.users.find_by_username(&req.username).await?.is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if req.email != user.email && state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    user.username = req.username;
    user.email = req.email;
    if let Some(first_name) = req.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        user.last_name = last_name;
    }
    user.updated_at = Utc::now();

    let saved = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(user_response(saved)))
}
