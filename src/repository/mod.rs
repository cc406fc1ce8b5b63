//! Repository layer for database operations
//!
//! Store methods take an executor (the pool or an open transaction), so the
//! service layer decides which statements share a transaction.

pub mod books;
pub mod people;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub people: people::PeopleRepository,
    max_retries: u32,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>, max_retries: u32) -> Self {
        Self {
            books: books::BooksRepository,
            people: people::PeopleRepository,
            pool,
            max_retries,
        }
    }

    /// Open a serializable transaction
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Number of extra attempts after a serialization conflict
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
