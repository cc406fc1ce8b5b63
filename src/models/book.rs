//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::person::Person;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year_of_publication: i32,
    /// Person currently holding the book, `None` when on the shelf
    #[sqlx(rename = "person_id")]
    pub borrower_id: Option<i32>,
}

impl Book {
    pub fn is_on_shelf(&self) -> bool {
        self.borrower_id.is_none()
    }
}

/// Book with its current borrower resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub owner: Option<Person>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 100, message = "Author must be between 2 and 100 characters"))]
    pub author: String,
    pub year_of_publication: i32,
}

/// Update book request. Replaces every descriptive field; the borrower is
/// only changed through assign/release.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 100, message = "Author must be between 2 and 100 characters"))]
    pub author: String,
    pub year_of_publication: i32,
}
