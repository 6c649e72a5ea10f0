//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, lending};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Lending API",
        version = "0.1.0",
        description = "Book inventory with checkout and return"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Lending
        lending::checkout_book,
        lending::return_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookMetadata,
            crate::models::book::LendingRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog"),
        (name = "lending", description = "Checkout and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
