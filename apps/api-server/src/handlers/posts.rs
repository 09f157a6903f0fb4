//! Post handlers: the public feed, post detail, and author CRUD.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use chronicle_core::domain::{Post, PostView, TITLE_MAX_LEN};
use chronicle_shared::dto::{
    AuthorDto, CategoryRefDto, LocationRefDto, PostDetailResponse, PostRequest, PostResponse,
};

use crate::handlers::PageQuery;
use crate::handlers::comments::comment_view_response;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn post_response(view: PostView) -> PostResponse {
    PostResponse {
        id: view.id,
        title: view.title,
        text: view.text,
        image_url: view.image_url,
        pub_date: view.pub_date,
        is_published: view.is_published,
        created_at: view.created_at,
        author: AuthorDto {
            id: view.author.id,
            username: view.author.username,
        },
        category: view.category.map(|c| CategoryRefDto {
            id: c.id,
            title: c.title,
            slug: c.slug,
        }),
        location: view.location.map(|l| LocationRefDto {
            id: l.id,
            name: l.name,
        }),
    }
}

fn validate_post_request(req: &PostRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push("title must not be empty".to_string());
    }
    if req.title.len() > TITLE_MAX_LEN {
        errors.push(format!("title must be at most {} characters", TITLE_MAX_LEN));
    }
    if req.text.trim().is_empty() {
        errors.push("text must not be empty".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Reject references to categories or locations that do not exist.
async fn check_references(state: &AppState, req: &PostRequest) -> Result<(), AppError> {
    if let Some(category_id) = req.category_id
        && state.categories.find_by_id(category_id).await?.is_none()
    {
        return Err(AppError::BadRequest("Unknown category".to_string()));
    }
    if let Some(location_id) = req.location_id
        && state.locations.find_by_id(location_id).await?.is_none()
    {
        return Err(AppError::BadRequest("Unknown location".to_string()));
    }
    Ok(())
}

/// GET /api/posts - the public feed, newest publication first.
pub async fn feed(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.page_feed(Utc::now(), query.request()).await?;

    Ok(HttpResponse::Ok().json(page.map(post_response)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_post_request(&req)?;
    check_references(&state, &req).await?;

    let mut post = Post::new(identity.user_id, req.title, req.text, req.pub_date);
    post.category_id = req.category_id;
    post.location_id = req.location_id;
    post.image_url = req.image_url;

    let saved = state.posts.insert(post).await?;

    // Re-read through the joined select so the response carries the
    // author/category/location names.
    let view = state
        .posts
        .find_view(saved.id)
        .await?
        .ok_or_else(|| AppError::Internal("Post vanished after insert".to_string()))?;

    Ok(HttpResponse::Created().json(post_response(view)))
}

/// GET /api/posts/{id}
///
/// The author sees their post unconditionally; everyone else only when the
/// visibility filter passes. Hidden posts are reported as missing, not
/// forbidden.
pub async fn detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let view = state
        .posts
        .find_view(id)
        .await?
        .filter(|v| v.is_visible_to(viewer.user_id(), Utc::now()))
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let comments = state.comments.list_for_post(id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(view),
        comments: comments.into_iter().map(comment_view_response).collect(),
    }))
}

/// PUT /api/posts/{id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    validate_post_request(&req)?;
    check_references(&state, &req).await?;

    post.title = req.title;
    post.text = req.text;
    post.category_id = req.category_id;
    post.location_id = req.location_id;
    post.image_url = req.image_url;
    if let Some(pub_date) = req.pub_date {
        post.pub_date = pub_date;
    }

    let saved = state.posts.update(post).await?;

    let view = state
        .posts
        .find_view(saved.id)
        .await?
        .ok_or_else(|| AppError::Internal("Post vanished after update".to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(view)))
}

/// DELETE /api/posts/{id} - author only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, text: &str) -> PostRequest {
        PostRequest {
            title: title.to_string(),
            text: text.to_string(),
            pub_date: None,
            category_id: None,
            location_id: None,
            image_url: None,
        }
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(matches!(
            validate_post_request(&request("", "body")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_post_request(&request("title", "   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn overlong_title_fails_validation() {
        let req = request(&"t".repeat(TITLE_MAX_LEN + 1), "body");
        assert!(matches!(
            validate_post_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn ordinary_request_passes() {
        assert!(validate_post_request(&request("A day in Prague", "Long text")).is_ok());
    }
}
