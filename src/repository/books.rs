//! Books repository (catalog store)

use sqlx::{PgConnection, PgExecutor};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    models::person::Person,
};

const BOOK_COLUMNS: &str = "id, title, author, year_of_publication, person_id";

/// Row of the book/owner join. Owner columns are null when on the shelf.
#[derive(sqlx::FromRow)]
struct OwnerRow {
    owner_id: Option<i32>,
    full_name: Option<String>,
    year_of_birth: Option<i32>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BooksRepository;

impl BooksRepository {
    /// Get book by ID
    pub async fn get_by_id<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM book WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Get book by ID and lock the row until the transaction ends
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM book WHERE id = $1 FOR UPDATE",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::book_not_found(id))
    }

    /// All books in insertion order
    pub async fn list<'e, E: PgExecutor<'e>>(&self, executor: E) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM book ORDER BY id", BOOK_COLUMNS))
            .fetch_all(executor)
            .await?;
        Ok(books)
    }

    /// First book with exactly this title
    pub async fn find_by_title<'e, E: PgExecutor<'e>>(&self, executor: E, title: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM book WHERE title = $1 ORDER BY id LIMIT 1",
            BOOK_COLUMNS
        ))
        .bind(title)
        .fetch_optional(executor)
        .await?;
        Ok(book)
    }

    /// Count books
    pub async fn count<'e, E: PgExecutor<'e>>(&self, executor: E) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Create a book, always on the shelf
    pub async fn create<'e, E: PgExecutor<'e>>(&self, executor: E, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO book (title, author, year_of_publication)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year_of_publication)
        .fetch_one(executor)
        .await?;
        Ok(book)
    }

    /// Replace title, author and year. The borrower is left untouched.
    pub async fn update<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE book SET title = $1, author = $2, year_of_publication = $3
            WHERE id = $4
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year_of_publication)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Delete a book. Whether it is borrowed does not matter.
    pub async fn delete<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::book_not_found(id));
        }
        Ok(())
    }

    /// Point the book at a borrower, or clear it with `None`
    pub async fn set_borrower<'e, E: PgExecutor<'e>>(
        &self,
        executor: E,
        id: i32,
        borrower_id: Option<i32>,
    ) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE book SET person_id = $1 WHERE id = $2 RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(borrower_id)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Clear the borrower on every book held by `person_id`
    pub async fn clear_borrower<'e, E: PgExecutor<'e>>(&self, executor: E, person_id: i32) -> AppResult<u64> {
        let result = sqlx::query("UPDATE book SET person_id = NULL WHERE person_id = $1")
            .bind(person_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Books whose borrower is `person_id`, in insertion order
    pub async fn list_by_borrower<'e, E: PgExecutor<'e>>(&self, executor: E, person_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM book WHERE person_id = $1 ORDER BY id",
            BOOK_COLUMNS
        ))
        .bind(person_id)
        .fetch_all(executor)
        .await?;
        Ok(books)
    }

    /// Resolve the borrower of a book in a single statement.
    /// `Err(NotFound)` when the book is missing, `Ok(None)` when on the shelf.
    pub async fn get_owner<'e, E: PgExecutor<'e>>(&self, executor: E, id: i32) -> AppResult<Option<Person>> {
        let row = sqlx::query_as::<_, OwnerRow>(
            r#"
            SELECT p.id AS owner_id, p.full_name, p.year_of_birth
            FROM book b
            LEFT JOIN person p ON p.id = b.person_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::book_not_found(id))?;

        Ok(match (row.owner_id, row.full_name) {
            (Some(owner_id), Some(full_name)) => Some(Person {
                id: owner_id,
                full_name,
                year_of_birth: row.year_of_birth,
            }),
            _ => None,
        })
    }
}
