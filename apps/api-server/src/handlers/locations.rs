//! Location handlers.

use actix_web::{HttpResponse, web};

use chronicle_core::domain::Location;
use chronicle_shared::dto::LocationResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn location_response(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
        is_published: location.is_published,
        created_at: location.created_at,
    }
}

/// GET /api/locations - published locations, for composing posts.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.locations.list_published().await?;

    Ok(HttpResponse::Ok().json(
        locations
            .into_iter()
            .map(location_response)
            .collect::<Vec<_>>(),
    ))
}
