//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, people};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending Catalog API",
        version = "1.0.0",
        description = "Books, borrowers and who holds what"
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
        books::find_book_by_title,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        books::get_owner,
        books::assign_book,
        books::release_book,
        people::get_held_books,
        // People
        people::list_people,
        people::find_person_by_name,
        people::get_person,
        people::create_person,
        people::update_person,
        people::delete_person,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::AssignRequest,
            books::OwnerResponse,
            // People
            crate::models::person::Person,
            crate::models::person::PersonDetails,
            crate::models::person::CreatePerson,
            crate::models::person::UpdatePerson,
            people::DeletePersonResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "people", description = "Borrower registry"),
        (name = "loans", description = "Assigning and releasing books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
