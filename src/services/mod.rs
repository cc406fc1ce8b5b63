//! Business logic services

#[macro_use]
mod transaction;

pub mod catalog;
pub mod registry;
pub mod relations;
pub mod uniqueness;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub registry: registry::RegistryService,
    pub relations: relations::RelationsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let relations = relations::RelationsService::new(repository.clone());
        let validator = uniqueness::UniquenessValidator::new(repository.clone());

        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            registry: registry::RegistryService::new(repository.clone(), relations.clone(), validator),
            relations,
            repository,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Reject ids that no record can have
pub(crate) fn check_id(id: i32, entity: &str) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::Validation(format!("Invalid {} id {}", entity, id)));
    }
    Ok(())
}
