//! HTTP handlers and route configuration.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod locations;
pub mod pages;
pub mod posts;
pub mod profiles;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use chronicle_core::ports::PageRequest;
use chronicle_shared::ErrorResponse;

/// Pagination query parameters shared by every listing route.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::feed))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::post().to(comments::create))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::put().to(comments::update),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(comments::delete),
                    ),
            )
            // Classification dimensions
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("/{slug}", web::get().to(categories::detail)),
            )
            .route("/locations", web::get().to(locations::list))
            // Profiles
            .route("/profile", web::put().to(profiles::update_own))
            .service(
                web::scope("/profiles").route("/{username}", web::get().to(profiles::detail)),
            )
            // Static pages
            .service(
                web::scope("/pages")
                    .route("/about", web::get().to(pages::about))
                    .route("/rules", web::get().to(pages::rules)),
            )
            // Admin surface
            .service(
                web::scope("/admin")
                    .route("/categories", web::post().to(admin::create_category))
                    .route("/categories/{id}", web::put().to(admin::update_category))
                    .route("/categories/{id}", web::delete().to(admin::delete_category))
                    .route("/locations", web::post().to(admin::create_location))
                    .route("/locations/{id}", web::put().to(admin::update_location))
                    .route("/locations/{id}", web::delete().to(admin::delete_location))
                    .route(
                        "/posts/{id}/published",
                        web::put().to(admin::set_post_published),
                    ),
            ),
    );
}

/// Fallback for unknown routes - the JSON counterpart of a custom 404 page.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .json(ErrorResponse::not_found("The requested resource does not exist"))
}
