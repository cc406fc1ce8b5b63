//! Relationship manager: who holds which book
//!
//! The relation is stored once, as `book.person_id`. A person's held books
//! are always read back from that column, never kept on the person side.

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{book::Book, person::Person},
    repository::Repository,
};

use super::check_id;

#[derive(Clone)]
pub struct RelationsService {
    repository: Repository,
}

impl RelationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a book to a person. Re-assigning to the current holder is a
    /// no-op; assigning a book held by someone else transfers it.
    pub async fn assign(&self, book_id: i32, person_id: i32) -> AppResult<Book> {
        check_id(book_id, "book")?;
        check_id(person_id, "person")?;

        transactional!(self.repository, |tx| {
            let book = self.repository.books.get_for_update(&mut *tx, book_id).await?;
            // Share lock: the person cannot be deleted until we commit.
            self.repository.people.get_for_share(&mut *tx, person_id).await?;

            if book.borrower_id == Some(person_id) {
                Ok(book)
            } else {
                self.repository.books.set_borrower(&mut *tx, book_id, Some(person_id)).await
            }
        })
    }

    /// Put a book back on the shelf. Releasing an unassigned book succeeds.
    pub async fn release(&self, book_id: i32) -> AppResult<Book> {
        check_id(book_id, "book")?;

        transactional!(self.repository, |tx| {
            let book = self.repository.books.get_for_update(&mut *tx, book_id).await?;
            if book.is_on_shelf() {
                Ok(book)
            } else {
                self.repository.books.set_borrower(&mut *tx, book_id, None).await
            }
        })
    }

    /// Current borrower of a book, `None` when on the shelf
    pub async fn get_owner(&self, book_id: i32) -> AppResult<Option<Person>> {
        check_id(book_id, "book")?;
        self.repository.books.get_owner(&self.repository.pool, book_id).await
    }

    /// Books currently referencing a person
    pub async fn held_books_of(&self, person_id: i32) -> AppResult<Vec<Book>> {
        check_id(person_id, "person")?;

        transactional!(self.repository, |tx| {
            self.repository.people.get_by_id(&mut *tx, person_id).await?;
            self.repository.books.list_by_borrower(&mut *tx, person_id).await
        })
    }

    /// Clear the borrower on every book held by a person. Runs on the
    /// caller's transaction so it commits or rolls back with the deletion.
    pub(crate) async fn detach_all_for_person(&self, conn: &mut PgConnection, person_id: i32) -> AppResult<u64> {
        self.repository.books.clear_borrower(conn, person_id).await
    }
}
