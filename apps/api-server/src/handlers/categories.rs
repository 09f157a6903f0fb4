//! Category handlers: the published list and per-category post pages.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;

use chronicle_core::domain::Category;
use chronicle_core::ports::Page;
use chronicle_shared::dto::{CategoryResponse, PostResponse};

use crate::handlers::PageQuery;
use crate::handlers::posts::post_response;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
        created_at: category.created_at,
    }
}

#[derive(Serialize)]
struct CategoryDetailResponse {
    category: CategoryResponse,
    posts: Page<PostResponse>,
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_published().await?;

    Ok(HttpResponse::Ok().json(
        categories
            .into_iter()
            .map(category_response)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/categories/{slug}
///
/// An unpublished category does not exist as far as readers are concerned.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

    let posts = state
        .posts
        .page_by_category(category.id, Utc::now(), query.request())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryDetailResponse {
        category: category_response(category),
        posts: posts.map(post_response),
    }))
}
