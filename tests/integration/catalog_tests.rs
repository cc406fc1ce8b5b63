//! Book catalog operations

use sqlx::PgPool;

use lending_catalog::{
    models::{CreateBook, UpdateBook},
    AppError,
};

use crate::common::{create_book, create_person, services};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_in_insertion_order(pool: PgPool) {
    let services = services(pool);
    let titles = ["Ulysses", "Dune", "Emma"];
    for title in titles {
        create_book(&services, title).await;
    }

    let books = services.catalog.list().await.unwrap();
    let listed: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(listed, titles);
    assert_eq!(services.catalog.count().await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_borrower(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;
    services.relations.assign(book.id, person.id).await.unwrap();

    let updated = services
        .catalog
        .update(
            book.id,
            &UpdateBook {
                title: "Dune Messiah".to_string(),
                author: "Frank Herbert".to_string(),
                year_of_publication: 1969,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, book.id);
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.year_of_publication, 1969);
    assert_eq!(updated.borrower_id, Some(person.id));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_book(pool: PgPool) {
    let services = services(pool);
    let err = services
        .catalog
        .update(
            7,
            &UpdateBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                year_of_publication: 1965,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_borrowed_book(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;
    services.relations.assign(book.id, person.id).await.unwrap();

    services.catalog.delete(book.id).await.unwrap();

    assert!(matches!(
        services.catalog.get_by_id(book.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(services.relations.held_books_of(person.id).await.unwrap().is_empty());
    assert!(matches!(
        services.catalog.delete(book.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_title(pool: PgPool) {
    let services = services(pool);
    let dune = create_book(&services, "Dune").await;
    create_book(&services, "Dune").await;

    let found = services.catalog.find_by_title("Dune").await.unwrap();
    assert_eq!(found.map(|b| b.id), Some(dune.id));
    assert_eq!(services.catalog.find_by_title("Emma").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_details_include_owner(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;

    let details = services.catalog.get_details(book.id).await.unwrap();
    assert_eq!(details.owner, None);

    services.relations.assign(book.id, person.id).await.unwrap();
    let details = services.catalog.get_details(book.id).await.unwrap();
    assert_eq!(details.book.borrower_id, Some(person.id));
    assert_eq!(details.owner, Some(person));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_invalid_input_never_reaches_storage(pool: PgPool) {
    let services = services(pool);
    let err = services
        .catalog
        .create(&CreateBook {
            title: String::new(),
            author: "Herbert".to_string(),
            year_of_publication: 1965,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(services.catalog.count().await.unwrap(), 0);
}
