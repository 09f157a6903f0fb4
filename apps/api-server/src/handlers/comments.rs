//! Comment handlers. Any authenticated user may comment on a post they can
//! see; editing and deleting are author-only.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use chronicle_core::domain::{Comment, CommentView};
use chronicle_shared::dto::{AuthorDto, CommentRequest, CommentResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn comment_view_response(view: CommentView) -> CommentResponse {
    CommentResponse {
        id: view.id,
        post_id: view.post_id,
        text: view.text,
        created_at: view.created_at,
        author: AuthorDto {
            id: view.author.id,
            username: view.author.username,
        },
    }
}

fn comment_response(comment: Comment, identity: &Identity) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        text: comment.text,
        created_at: comment.created_at,
        author: AuthorDto {
            id: identity.user_id,
            username: identity.username.clone(),
        },
    }
}

fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "text must not be empty".to_string(),
        ]));
    }
    Ok(())
}

/// Fetch a comment and check it belongs to the post in the path and to the
/// caller. A comment under the wrong post is reported as missing.
async fn owned_comment(
    state: &AppState,
    post_id: Uuid,
    comment_id: Uuid,
    identity: &Identity,
) -> Result<Comment, AppError> {
    let comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

    if comment.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(comment)
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    validate_text(&req.text)?;

    // The post must exist and be visible to the caller.
    state
        .posts
        .find_view(post_id)
        .await?
        .filter(|v| v.is_visible_to(Some(identity.user_id), Utc::now()))
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    let comment = Comment::new(post_id, identity.user_id, req.text);
    let saved = state.comments.insert(comment).await?;

    Ok(HttpResponse::Created().json(comment_response(saved, &identity)))
}

/// PUT /api/posts/{post_id}/comments/{comment_id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let req = body.into_inner();
    validate_text(&req.text)?;

    let mut comment = owned_comment(&state, post_id, comment_id, &identity).await?;
    comment.text = req.text;

    let saved = state.comments.update(comment).await?;

    Ok(HttpResponse::Ok().json(comment_response(saved, &identity)))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id} - author only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = owned_comment(&state, post_id, comment_id, &identity).await?;
    state.comments.delete(comment.id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_text_is_rejected() {
        assert!(matches!(
            validate_text("  \n "),
            Err(AppError::Validation(_))
        ));
        assert!(validate_text("Nice post!").is_ok());
    }
}
