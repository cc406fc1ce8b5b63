//! Registry service (persons)

use validator::Validate;

use crate::{
    error::AppResult,
    models::person::{CreatePerson, Person, PersonDetails, UpdatePerson},
    repository::Repository,
};

use super::{check_id, relations::RelationsService, uniqueness::UniquenessValidator};

#[derive(Clone)]
pub struct RegistryService {
    repository: Repository,
    relations: RelationsService,
    validator: UniquenessValidator,
}

impl RegistryService {
    pub fn new(repository: Repository, relations: RelationsService, validator: UniquenessValidator) -> Self {
        Self {
            repository,
            relations,
            validator,
        }
    }

    /// Register a person. The name check and the insert share a transaction.
    pub async fn create(&self, data: &CreatePerson) -> AppResult<Person> {
        data.validate()?;

        transactional!(self.repository, |tx| {
            self.validator.check_name_available(&mut *tx, &data.full_name, None).await?;
            self.repository.people.create(&mut *tx, data).await
        })
    }

    /// Get person by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Person> {
        check_id(id, "person")?;
        self.repository.people.get_by_id(&self.repository.pool, id).await
    }

    /// Get person by ID together with the books they hold
    pub async fn get_details(&self, id: i32) -> AppResult<PersonDetails> {
        check_id(id, "person")?;

        transactional!(self.repository, |tx| {
            let person = self.repository.people.get_by_id(&mut *tx, id).await?;
            let held_books = self.repository.books.list_by_borrower(&mut *tx, id).await?;
            Ok(PersonDetails { person, held_books })
        })
    }

    /// All persons in insertion order
    pub async fn list(&self) -> AppResult<Vec<Person>> {
        self.repository.people.list(&self.repository.pool).await
    }

    /// Person with exactly this full name
    pub async fn find_by_name(&self, full_name: &str) -> AppResult<Option<Person>> {
        self.repository.people.find_by_name(&self.repository.pool, full_name).await
    }

    /// Count persons
    pub async fn count(&self) -> AppResult<i64> {
        self.repository.people.count(&self.repository.pool).await
    }

    /// Replace full name and year of birth. The new name must not belong to
    /// anyone else.
    pub async fn update(&self, id: i32, data: &UpdatePerson) -> AppResult<Person> {
        check_id(id, "person")?;
        data.validate()?;

        transactional!(self.repository, |tx| {
            self.repository.people.get_for_update(&mut *tx, id).await?;
            self.validator.check_name_available(&mut *tx, &data.full_name, Some(id)).await?;
            self.repository.people.update(&mut *tx, id, data).await
        })
    }

    /// Delete a person. Every book they hold goes back on the shelf in the
    /// same transaction; books are never deleted. Returns how many were
    /// detached.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        check_id(id, "person")?;

        transactional!(self.repository, |tx| {
            self.repository.people.get_for_update(&mut *tx, id).await?;
            let detached = self.relations.detach_all_for_person(&mut *tx, id).await?;
            self.repository.people.delete(&mut *tx, id).await?;
            Ok(detached)
        })
    }
}
