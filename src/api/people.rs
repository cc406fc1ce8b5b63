//! Person endpoints

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
        book::Book,
        person::{CreatePerson, Person, PersonDetails, UpdatePerson},
    },
};

/// Name lookup query
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact full name
    pub name: String,
}

/// Result of deleting a person
#[derive(Serialize, ToSchema)]
pub struct DeletePersonResponse {
    /// Books put back on the shelf
    pub detached_books: u64,
}

/// List all people
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    responses(
        (status = 200, description = "People in insertion order", body = Vec<Person>)
    )
)]
pub async fn list_people(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Person>>> {
    let people = state.services.registry.list().await?;
    Ok(Json(people))
}

/// Find a person by exact full name
#[utoipa::path(
    get,
    path = "/people/search",
    tag = "people",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching person", body = Person),
        (status = 404, description = "No person with this name")
    )
)]
pub async fn find_person_by_name(
    State(state): State<crate::AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Person>> {
    let person = state
        .services
        .registry
        .find_by_name(&query.name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No person named {:?}", query.name)))?;
    Ok(Json(person))
}

/// Get person details with held books
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = PersonDetails),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PersonDetails>> {
    let person = state.services.registry.get_details(id).await?;
    Ok(Json(person))
}

/// Books held by a person
#[utoipa::path(
    get,
    path = "/people/{id}/books",
    tag = "loans",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Held books, possibly empty", body = Vec<Book>),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_held_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.relations.held_books_of(id).await?;
    Ok(Json(books))
}

/// Register a person
#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    request_body = CreatePerson,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Full name already taken")
    )
)]
pub async fn create_person(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    let person = state.services.registry.create(&data).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// Update a person
#[utoipa::path(
    put,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    request_body = UpdatePerson,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Full name already taken")
    )
)]
pub async fn update_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePerson>,
) -> AppResult<Json<Person>> {
    let person = state.services.registry.update(id, &data).await?;
    Ok(Json(person))
}

/// Delete a person, returning their books to the shelf
#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person deleted", body = DeletePersonResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn delete_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeletePersonResponse>> {
    let detached_books = state.services.registry.delete(id).await?;
    Ok(Json(DeletePersonResponse { detached_books }))
}
