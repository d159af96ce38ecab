use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::consts::PersonId;

/// The stored entity. `nome` is the only schema-mandated field; anything
/// else the caller sent on create/update rides along in `extra` untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub nome: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    /// Assigns a fresh id. Only the persistence layer constructs stored
    /// people, the id is immutable from then on.
    pub fn new(nome: String, extra: Map<String, Value>) -> Self {
        Person {
            id: PersonId::new(),
            nome,
            extra,
        }
    }

    pub fn new_test() -> Self {
        Person {
            id: PersonId("1".to_string()),
            nome: "Nome".to_string(),
            extra: Map::new(),
        }
    }
}
