//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, people};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "1.0.0",
        description = "Book lending REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::assign_book,
        books::return_book,
        books::search_books,
        books::submit_search,
        // People
        people::list_people,
        people::get_person,
        people::create_person,
        people::update_person,
        people::delete_person,
    ),
    components(
        schemas(
            crate::models::book::BookDto,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::AssignBook,
            crate::models::person::PersonDto,
            crate::models::person::CreatePerson,
            crate::models::person::UpdatePerson,
            crate::api::CreatedResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Books and lending"),
        (name = "people", description = "Borrowers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
