//! Admin handlers: category and location management, and moderation of
//! post published flags. All routes require the `admin` role.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chronicle_core::domain::{Category, Location, TITLE_MAX_LEN, is_valid_slug};
use chronicle_shared::dto::{CategoryRequest, LocationRequest, SetPublishedRequest};

use crate::handlers::categories::category_response;
use crate::handlers::locations::location_response;
use crate::handlers::posts::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.has_role("admin") {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn validate_category_request(req: &CategoryRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() || req.title.len() > TITLE_MAX_LEN {
        errors.push(format!("title must be 1..={} characters", TITLE_MAX_LEN));
    }
    if !is_valid_slug(&req.slug) {
        errors.push("slug may only contain lowercase letters, digits, - and _".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn validate_location_request(req: &LocationRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() || req.name.len() > TITLE_MAX_LEN {
        return Err(AppError::Validation(vec![format!(
            "name must be 1..={} characters",
            TITLE_MAX_LEN
        )]));
    }
    Ok(())
}

/// POST /api/admin/categories
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    let req = body.into_inner();
    validate_category_request(&req)?;

    if state.categories.find_by_slug(&req.slug).await?.is_some() {
        return Err(AppError::Conflict("Slug already in use".to_string()));
    }

    let mut category = Category::new(req.title, req.description, req.slug);
    category.is_published = req.is_published;

    let saved = state.categories.insert(category).await?;

    Ok(HttpResponse::Created().json(category_response(saved)))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    let id = path.into_inner();
    let req = body.into_inner();
    validate_category_request(&req)?;

    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

    if req.slug != category.slug && state.categories.find_by_slug(&req.slug).await?.is_some() {
        return Err(AppError::Conflict("Slug already in use".to_string()));
    }

    category.title = req.title;
    category.description = req.description;
    category.slug = req.slug;
    category.is_published = req.is_published;

    let saved = state.categories.update(category).await?;

    Ok(HttpResponse::Ok().json(category_response(saved)))
}

/// DELETE /api/admin/categories/{id}
///
/// Posts filed under the category stay, uncategorized - and therefore
/// drop out of public listings.
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    state.categories.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/admin/locations
pub async fn create_location(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    let req = body.into_inner();
    validate_location_request(&req)?;

    let mut location = Location::new(req.name);
    location.is_published = req.is_published;

    let saved = state.locations.insert(location).await?;

    Ok(HttpResponse::Created().json(location_response(saved)))
}

/// PUT /api/admin/locations/{id}
pub async fn update_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    let id = path.into_inner();
    let req = body.into_inner();
    validate_location_request(&req)?;

    let mut location = state
        .locations
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))?;

    location.name = req.name;
    location.is_published = req.is_published;

    let saved = state.locations.update(location).await?;

    Ok(HttpResponse::Ok().json(location_response(saved)))
}

/// DELETE /api/admin/locations/{id}
pub async fn delete_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    state.locations.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/admin/posts/{id}/published - moderation switch for any post.
pub async fn set_post_published(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SetPublishedRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;
    let id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    post.is_published = body.is_published;
    state.posts.update(post).await?;

    let view = state
        .posts
        .find_view(id)
        .await?
        .ok_or_else(|| AppError::Internal("Post vanished after update".to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(view)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(roles: &[&str]) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "mod".into(),
            email: "mod@example.com".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn admin_role_is_required() {
        assert!(require_admin(&identity(&["user", "admin"])).is_ok());
        assert!(matches!(
            require_admin(&identity(&["user"])),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn category_slug_is_validated() {
        let req = CategoryRequest {
            title: "Travel".into(),
            description: String::new(),
            slug: "Bad Slug".into(),
            is_published: true,
        };
        assert!(matches!(
            validate_category_request(&req),
            Err(AppError::Validation(_))
        ));
    }
}
