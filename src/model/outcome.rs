use crate::{
    consts::consts::PersonId,
    model::{person::Person, validate::ValidationError},
    persistence::store::StoreError,
};

/// Result of a single service operation. Every variant maps to exactly one
/// transport response, absence and validation failures are first-class
/// outcomes rather than errors.
#[derive(Clone, Debug, PartialEq)]
pub enum PersonOutcome {
    Created(Person),
    Found(Person),
    FoundAll(Vec<Person>),
    Updated(Person),
    Deleted(PersonId),
    Absent(PersonId),
    ValidationFailed(ValidationError),
    PersistenceFailed(StoreError),
}
