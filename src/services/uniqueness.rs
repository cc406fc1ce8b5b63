//! Uniqueness check for person names

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

#[derive(Clone)]
pub struct UniquenessValidator {
    repository: Repository,
}

impl UniquenessValidator {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fail with `Conflict` when another person already uses `full_name`.
    ///
    /// Must run on the same transaction as the insert or update it guards.
    /// The unique constraint on `person.full_name` remains the backstop and
    /// surfaces as `Conflict` too.
    pub async fn check_name_available(
        &self,
        conn: &mut PgConnection,
        full_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        if self.repository.people.name_exists(conn, full_name, exclude_id).await? {
            return Err(AppError::Conflict(
                "Person with this name already exists".to_string(),
            ));
        }
        Ok(())
    }
}
