use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    consts::consts::PersonId,
    model::{outcome::PersonOutcome, validate::validate, validate::ValidationError},
    persistence::store::{PersonPatch, PersonStore, StoreError},
};

/// Orchestrates validate -> persist/query -> outcome mapping for the five
/// operations. Holds no state of its own beyond the shared store handle and
/// never retries, every failure surfaces immediately.
pub struct PersonService {
    store: Arc<dyn PersonStore>,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    pub async fn create_person(&self, input: Map<String, Value>) -> PersonOutcome {
        let valid = match validate(&input) {
            Ok(valid) => valid,
            Err(error) => return PersonOutcome::ValidationFailed(error),
        };

        match self.store.create(valid).await {
            Ok(person) => PersonOutcome::Created(person),
            Err(error) => PersonOutcome::PersistenceFailed(error),
        }
    }

    pub async fn list_people(&self) -> PersonOutcome {
        match self.store.list_all().await {
            Ok(people) => PersonOutcome::FoundAll(people),
            Err(error) => PersonOutcome::PersistenceFailed(error),
        }
    }

    pub async fn get_person(&self, id: PersonId) -> PersonOutcome {
        match self.store.find_by_id(&id).await {
            Ok(Some(person)) => PersonOutcome::Found(person),
            Ok(None) => PersonOutcome::Absent(id),
            Err(error) => PersonOutcome::PersistenceFailed(error),
        }
    }

    /// Merge semantics live in the store, a storage-level schema rejection
    /// of the merged document comes back as a validation failure so the
    /// caller sees the same contract on both write paths.
    pub async fn update_person(&self, id: PersonId, patch: PersonPatch) -> PersonOutcome {
        match self.store.update_by_id(&id, patch).await {
            Ok(Some(person)) => PersonOutcome::Updated(person),
            Ok(None) => PersonOutcome::Absent(id),
            Err(StoreError::Constraint { field, reason }) => {
                PersonOutcome::ValidationFailed(ValidationError { field, reason })
            }
            Err(error) => PersonOutcome::PersistenceFailed(error),
        }
    }

    pub async fn delete_person(&self, id: PersonId) -> PersonOutcome {
        match self.store.delete_by_id(&id).await {
            Ok(Some(_)) => PersonOutcome::Deleted(id),
            Ok(None) => PersonOutcome::Absent(id),
            Err(error) => PersonOutcome::PersistenceFailed(error),
        }
    }
}
