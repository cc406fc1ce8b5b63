//! Book endpoints, including assign/release

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetails, CreateBook, UpdateBook},
        person::Person,
    },
};

/// Title lookup query
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleQuery {
    /// Exact title
    pub title: String,
}

/// Assign request
#[derive(Deserialize, ToSchema)]
pub struct AssignRequest {
    /// Person who takes the book
    pub person_id: i32,
}

/// Current borrower of a book
#[derive(Serialize, ToSchema)]
pub struct OwnerResponse {
    pub book_id: i32,
    /// `null` when the book is on the shelf
    pub owner: Option<Person>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list().await?;
    Ok(Json(books))
}

/// Find a book by exact title
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching book", body = Book),
        (status = 404, description = "No book with this title")
    )
)]
pub async fn find_book_by_title(
    State(state): State<crate::AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .catalog
        .find_by_title(&query.title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No book titled {:?}", query.title)))?;
    Ok(Json(book))
}

/// Get book details with current owner
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_details(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the current borrower of a book
#[utoipa::path(
    get,
    path = "/books/{id}/owner",
    tag = "loans",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Current owner, null when on the shelf", body = OwnerResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_owner(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OwnerResponse>> {
    let owner = state.services.relations.get_owner(id).await?;
    Ok(Json(OwnerResponse { book_id: id, owner }))
}

/// Assign a book to a person
#[utoipa::path(
    post,
    path = "/books/{id}/assign",
    tag = "loans",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Book assigned", body = Book),
        (status = 404, description = "Book or person not found"),
        (status = 503, description = "Concurrent update, retry")
    )
)]
pub async fn assign_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AssignRequest>,
) -> AppResult<Json<Book>> {
    let book = state.services.relations.assign(id, request.person_id).await?;
    Ok(Json(book))
}

/// Release a book back to the shelf
#[utoipa::path(
    post,
    path = "/books/{id}/release",
    tag = "loans",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book on the shelf", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn release_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.relations.release(id).await?;
    Ok(Json(book))
}
