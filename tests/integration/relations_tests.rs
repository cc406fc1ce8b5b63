//! Assign, release and the derived held-books view

use sqlx::PgPool;

use lending_catalog::{models::CreateBook, AppError};

use crate::common::{create_book, create_person, services};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_lending_scenario(pool: PgPool) {
    let services = services(pool);

    let book = services
        .catalog
        .create(&CreateBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year_of_publication: 1965,
        })
        .await
        .unwrap();
    assert_eq!(book.id, 1);
    assert!(book.is_on_shelf());

    let person = create_person(&services, "Jane Doe Wilson").await;
    assert_eq!(person.id, 1);

    services.relations.assign(1, 1).await.unwrap();
    let owner = services.relations.get_owner(1).await.unwrap();
    assert_eq!(owner.map(|p| p.id), Some(1));

    services.registry.delete(1).await.unwrap();

    assert_eq!(services.relations.get_owner(1).await.unwrap(), None);
    let book = services.catalog.get_by_id(1).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.borrower_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_assign_then_release(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;

    let assigned = services.relations.assign(book.id, person.id).await.unwrap();
    assert_eq!(assigned.borrower_id, Some(person.id));

    let released = services.relations.release(book.id).await.unwrap();
    assert!(released.is_on_shelf());
    assert_eq!(services.relations.get_owner(book.id).await.unwrap(), None);
    assert!(services.relations.held_books_of(person.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_release_unassigned_is_noop(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;

    let released = services.relations.release(book.id).await.unwrap();
    assert_eq!(released, book);

    let released = services.relations.release(book.id).await.unwrap();
    assert!(released.is_on_shelf());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_assign_is_idempotent(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;

    services.relations.assign(book.id, person.id).await.unwrap();
    services.relations.assign(book.id, person.id).await.unwrap();

    let held = services.relations.held_books_of(person.id).await.unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].id, book.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_assign_transfers_between_people(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let first = create_person(&services, "Jane Doe Wilson").await;
    let second = create_person(&services, "John Roe Mitchell").await;

    services.relations.assign(book.id, first.id).await.unwrap();
    services.relations.assign(book.id, second.id).await.unwrap();

    let owner = services.relations.get_owner(book.id).await.unwrap();
    assert_eq!(owner, Some(second.clone()));
    assert!(services.relations.held_books_of(first.id).await.unwrap().is_empty());
    assert_eq!(services.relations.held_books_of(second.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_assign_missing_records(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let person = create_person(&services, "Jane Doe Wilson").await;

    let err = services.relations.assign(999, person.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg.contains("Book")));

    let err = services.relations.assign(book.id, 999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg.contains("Person")));

    // A failed assign leaves nothing behind
    assert!(services.catalog.get_by_id(book.id).await.unwrap().is_on_shelf());

    assert!(matches!(
        services.relations.release(999).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.relations.get_owner(999).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.relations.held_books_of(999).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_owner_and_held_books_agree(pool: PgPool) {
    let services = services(pool);
    let mut books = Vec::new();
    for title in ["Dune", "Emma", "Ulysses", "Beloved", "Middlemarch"] {
        books.push(create_book(&services, title).await);
    }
    let alice = create_person(&services, "Alice Margaret Hart").await;
    let bruno = create_person(&services, "Bruno Oliveira Costa").await;
    let carla = create_person(&services, "Carla Jensen Moore").await;

    services.relations.assign(books[0].id, alice.id).await.unwrap();
    services.relations.assign(books[1].id, alice.id).await.unwrap();
    services.relations.assign(books[2].id, bruno.id).await.unwrap();
    services.relations.assign(books[3].id, bruno.id).await.unwrap();
    services.relations.assign(books[3].id, alice.id).await.unwrap();
    services.relations.release(books[1].id).await.unwrap();

    let people = [alice, bruno, carla];
    for book in &books {
        let owner = services.relations.get_owner(book.id).await.unwrap();
        for person in &people {
            let held = services.relations.held_books_of(person.id).await.unwrap();
            let holds = held.iter().any(|b| b.id == book.id);
            assert_eq!(
                owner.as_ref().map(|p| p.id) == Some(person.id),
                holds,
                "book {} / person {}",
                book.id,
                person.id
            );
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_assigns_leave_single_owner(pool: PgPool) {
    let services = services(pool);
    let book = create_book(&services, "Dune").await;
    let first = create_person(&services, "Jane Doe Wilson").await;
    let second = create_person(&services, "John Roe Mitchell").await;

    let (a, b) = tokio::join!(
        services.relations.assign(book.id, first.id),
        services.relations.assign(book.id, second.id),
    );
    a.unwrap();
    b.unwrap();

    let owner = services
        .relations
        .get_owner(book.id)
        .await
        .unwrap()
        .expect("book should be held");
    let first_holds = services.relations.held_books_of(first.id).await.unwrap();
    let second_holds = services.relations.held_books_of(second.id).await.unwrap();
    assert_eq!(first_holds.len() + second_holds.len(), 1);
    if owner.id == first.id {
        assert_eq!(first_holds.len(), 1);
    } else {
        assert_eq!(second_holds.len(), 1);
    }
}
