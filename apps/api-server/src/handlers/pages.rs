//! Static informational pages, served as JSON documents.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct PageDocument {
    pub slug: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// GET /api/pages/about
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(PageDocument {
        slug: "about",
        title: "About Chronicle",
        body: "Chronicle is a multi-user blogging platform. Authors publish \
               posts under categories and locations, schedule publications \
               for the future, and discuss them with other registered users.",
    })
}

/// GET /api/pages/rules
pub async fn rules() -> HttpResponse {
    HttpResponse::Ok().json(PageDocument {
        slug: "rules",
        title: "Community Rules",
        body: "Register with a working email address. Publish only content \
               you authored or may redistribute. Keep comments on topic; \
               moderators may unpublish posts that break these rules.",
    })
}
