use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::{
        person::Person,
        validate::{ValidPerson, ID_FIELD, NOME_FIELD},
    },
};

/// Partial update document. Fields present overwrite the stored value,
/// fields absent are left untouched.
pub type PersonPatch = Map<String, Value>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("storage connection failure: {0}")]
    Connection(String),

    #[error("storage rejected document, {field}: {reason}")]
    Constraint { field: String, reason: String },

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn constraint(field: &str, reason: &str) -> Self {
        StoreError::Constraint {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The persistence gateway. Absence is a routine outcome of a valid lookup,
/// so it travels as `Ok(None)` rather than as an error.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Assigns a fresh id and persists every field of the candidate.
    async fn create(&self, person: ValidPerson) -> Result<Person, StoreError>;

    /// Every stored person, in storage-native order. Empty is Ok.
    async fn list_all(&self) -> Result<Vec<Person>, StoreError>;

    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;

    /// Merges the patch into the stored document and returns the post-update
    /// value. The merged result is re-validated here, a patch that would
    /// blank `nome` is a constraint rejection.
    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, StoreError>;

    async fn delete_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;
}

/// Shared patch screening for every backend. Strips the immutable `id`
/// field and rejects a patch whose merged result could not satisfy the
/// schema (`nome` set to null, empty, or a non-text value).
pub fn sanitize_patch(mut patch: PersonPatch) -> Result<PersonPatch, StoreError> {
    patch.remove(ID_FIELD);

    match patch.get(NOME_FIELD) {
        None => {}
        Some(Value::String(nome)) if !nome.is_empty() => {}
        Some(Value::String(_)) => {
            return Err(StoreError::constraint(NOME_FIELD, "must not be empty"))
        }
        Some(Value::Null) => {
            return Err(StoreError::constraint(NOME_FIELD, "cannot be set to null"))
        }
        Some(_) => return Err(StoreError::constraint(NOME_FIELD, "must be a text value")),
    }

    Ok(patch)
}
