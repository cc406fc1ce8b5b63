//! Shared fixtures

use sqlx::PgPool;

use lending_catalog::{
    models::{Book, CreateBook, CreatePerson, Person},
    repository::Repository,
    services::Services,
};

pub fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool, 3))
}

pub async fn create_book(services: &Services, title: &str) -> Book {
    services
        .catalog
        .create(&CreateBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            year_of_publication: 1965,
        })
        .await
        .expect("Failed to create book")
}

pub async fn create_person(services: &Services, full_name: &str) -> Person {
    services
        .registry
        .create(&CreatePerson {
            full_name: full_name.to_string(),
            year_of_birth: Some(1980),
        })
        .await
        .expect("Failed to create person")
}
