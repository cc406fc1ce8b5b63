//! API handlers for the lending catalog REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod people;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search", get(books::find_book_by_title))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        .route("/books/:id/owner", get(books::get_owner))
        .route("/books/:id/assign", post(books::assign_book))
        .route("/books/:id/release", post(books::release_book))
        // People (registry)
        .route("/people", get(people::list_people).post(people::create_person))
        .route("/people/search", get(people::find_person_by_name))
        .route(
            "/people/:id",
            get(people::get_person).put(people::update_person).delete(people::delete_person),
        )
        .route("/people/:id/books", get(people::get_held_books))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
