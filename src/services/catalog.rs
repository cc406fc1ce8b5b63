//! Catalog management service (books)

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, CreateBook, UpdateBook},
    repository::Repository,
};

use super::check_id;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog, on the shelf
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.books.create(&self.repository.pool, data).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        check_id(id, "book")?;
        self.repository.books.get_by_id(&self.repository.pool, id).await
    }

    /// Get book by ID together with its current borrower
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        check_id(id, "book")?;

        transactional!(self.repository, |tx| {
            let book = self.repository.books.get_by_id(&mut *tx, id).await?;
            let owner = self.repository.books.get_owner(&mut *tx, id).await?;
            Ok(BookDetails { book, owner })
        })
    }

    /// All books in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list(&self.repository.pool).await
    }

    /// First book with exactly this title
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        self.repository.books.find_by_title(&self.repository.pool, title).await
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        self.repository.books.count(&self.repository.pool).await
    }

    /// Replace title, author and year of a book
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        check_id(id, "book")?;
        data.validate()?;
        self.repository.books.update(&self.repository.pool, id, data).await
    }

    /// Delete a book, borrowed or not
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        check_id(id, "book")?;
        self.repository.books.delete(&self.repository.pool, id).await
    }
}
