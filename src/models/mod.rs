//! Data models for the lending catalog

pub mod book;
pub mod person;

// Re-export commonly used types
pub use book::{Book, BookDetails, CreateBook, UpdateBook};
pub use person::{CreatePerson, Person, PersonDetails, UpdatePerson};
