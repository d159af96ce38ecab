use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new() -> PersonId {
        PersonId(Uuid::new_v4().to_string())
    }

    /// Lookups with an id that could never have been assigned are uniform
    /// not-found results, so callers can pre-check the shape here.
    pub fn is_well_formed(&self) -> bool {
        Uuid::parse_str(&self.0).is_ok()
    }
}

impl Default for PersonId {
    fn default() -> Self {
        PersonId::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        PersonId(value)
    }
}
