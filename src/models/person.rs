//! Person (borrower) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Person record from database. Held books are never stored here, see
/// [`PersonDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub full_name: String,
    pub year_of_birth: Option<i32>,
}

/// Person with the books currently referencing them
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonDetails {
    pub person: Person,
    pub held_books: Vec<Book>,
}

/// Create person request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePerson {
    /// Must be unique across all persons
    #[validate(length(min = 10, max = 200, message = "Name must be between 10 and 200 characters"))]
    pub full_name: String,
    #[validate(range(min = 1900, max = 9999, message = "Year of birth must be a four digit year from 1900"))]
    pub year_of_birth: Option<i32>,
}

/// Update person request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePerson {
    #[validate(length(min = 10, max = 200, message = "Name must be between 10 and 200 characters"))]
    pub full_name: String,
    #[validate(range(min = 1900, max = 9999, message = "Year of birth must be a four digit year from 1900"))]
    pub year_of_birth: Option<i32>,
}
