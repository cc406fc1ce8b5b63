//! People repository (registry store)

use sqlx::{PgConnection, PgExecutor};

use crate::{
    error::{AppError, AppResult},
    models::person::{CreatePerson, Person, UpdatePerson},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct PeopleRepository;

impl PeopleRepository {
    /// Get person by ID
    pub async fn get_by_id<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32) -> AppResult<Person> {
        sqlx::query_as::<_, Person>("SELECT id, full_name, year_of_birth FROM person WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::person_not_found(id))
    }

    /// Get person by ID, blocking concurrent deletion until the transaction ends
    pub async fn get_for_share(&self, conn: &mut PgConnection, id: i32) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "SELECT id, full_name, year_of_birth FROM person WHERE id = $1 FOR SHARE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::person_not_found(id))
    }

    /// Get person by ID and lock the row until the transaction ends
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "SELECT id, full_name, year_of_birth FROM person WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::person_not_found(id))
    }

    /// All persons in insertion order
    pub async fn list<'e, E: PgExecutor<'e>>(&self, executor: E) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT id, full_name, year_of_birth FROM person ORDER BY id",
        )
        .fetch_all(executor)
        .await?;
        Ok(people)
    }

    /// Person with exactly this full name
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(&self, executor: E, full_name: &str) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            "SELECT id, full_name, year_of_birth FROM person WHERE full_name = $1",
        )
        .bind(full_name)
        .fetch_optional(executor)
        .await?;
        Ok(person)
    }

    /// Check if a full name is taken, optionally ignoring one person
    pub async fn name_exists<'e, E: PgExecutor<'e>>(
        &self,
        executor: E,
        full_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM person WHERE full_name = $1 AND ($2::int IS NULL OR id != $2))",
        )
        .bind(full_name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Count persons
    pub async fn count<'e, E: PgExecutor<'e>>(&self, executor: E) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Insert a person
    pub async fn create<'e, E: PgExecutor<'e>>(&self, executor: E, data: &CreatePerson) -> AppResult<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO person (full_name, year_of_birth)
            VALUES ($1, $2)
            RETURNING id, full_name, year_of_birth
            "#,
        )
        .bind(&data.full_name)
        .bind(data.year_of_birth)
        .fetch_one(executor)
        .await?;
        Ok(person)
    }

    /// Replace full name and year of birth
    pub async fn update<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32, data: &UpdatePerson) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            r#"
            UPDATE person SET full_name = $1, year_of_birth = $2
            WHERE id = $3
            RETURNING id, full_name, year_of_birth
            "#,
        )
        .bind(&data.full_name)
        .bind(data.year_of_birth)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::person_not_found(id))
    }

    /// Remove the person row. Books must already be detached.
    pub async fn delete<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::person_not_found(id));
        }
        Ok(())
    }
}
