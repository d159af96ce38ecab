use serde_json::{Map, Value};
use thiserror::Error;

pub const NOME_FIELD: &str = "nome";
pub const ID_FIELD: &str = "id";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A candidate that passed schema validation, ready for the persistence
/// layer to assign an id and store.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidPerson {
    pub nome: String,
    pub extra: Map<String, Value>,
}

/// Schema check for a prospective person: `nome` must be present, textual
/// and non-empty. Every other field passes through unvalidated. A caller
/// supplied `id` is dropped, ids are assigned by the store and never by
/// request bodies.
pub fn validate(candidate: &Map<String, Value>) -> Result<ValidPerson, ValidationError> {
    let mut extra = candidate.clone();
    extra.remove(ID_FIELD);

    let nome = match extra.remove(NOME_FIELD) {
        None | Some(Value::Null) => {
            return Err(ValidationError::new(NOME_FIELD, "required field missing"))
        }
        Some(Value::String(nome)) => nome,
        Some(_) => return Err(ValidationError::new(NOME_FIELD, "must be a text value")),
    };

    if nome.is_empty() {
        return Err(ValidationError::new(NOME_FIELD, "must not be empty"));
    }

    Ok(ValidPerson { nome, extra })
}
