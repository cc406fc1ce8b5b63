//! Integration tests
//!
//! The router tests run without a database. Tests taking a `PgPool` get a
//! fresh migrated database from `#[sqlx::test]` and need `DATABASE_URL`;
//! run them with: cargo test -- --ignored

mod catalog_tests;
mod common;
mod relations_tests;
