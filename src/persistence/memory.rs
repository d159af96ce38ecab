use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    consts::consts::PersonId,
    model::{
        person::Person,
        validate::{ValidPerson, NOME_FIELD},
    },
};

use super::store::{sanitize_patch, PersonPatch, PersonStore, StoreError};

/// In-process document map, selected by running without `--table`. Backs
/// tests and table-less local runs, single-document atomicity comes from
/// holding the write lock across the read-merge-write of an update.
pub struct MemoryStore {
    people: RwLock<HashMap<PersonId, Person>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            people: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

fn merge(person: &mut Person, patch: PersonPatch) {
    for (field, value) in patch {
        if field == NOME_FIELD {
            if let Value::String(nome) = value {
                person.nome = nome;
            }
        } else {
            person.extra.insert(field, value);
        }
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn create(&self, person: ValidPerson) -> Result<Person, StoreError> {
        let stored = Person::new(person.nome, person.extra);

        self.people
            .write()
            .await
            .insert(stored.id.clone(), stored.clone());

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Person>, StoreError> {
        Ok(self.people.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.people.read().await.get(id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, StoreError> {
        // Malformed ids are uniform not-found, even when the patch itself
        // would be rejected
        if !id.is_well_formed() {
            return Ok(None);
        }

        let patch = sanitize_patch(patch)?;

        let mut people = self.people.write().await;

        let person = match people.get_mut(id) {
            Some(person) => person,
            None => return Ok(None),
        };

        merge(person, patch);

        Ok(Some(person.clone()))
    }

    async fn delete_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.people.write().await.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    fn valid_person(nome: &str) -> ValidPerson {
        ValidPerson {
            nome: nome.to_string(),
            extra: Map::new(),
        }
    }

    fn patch(value: serde_json::Value) -> PersonPatch {
        value.as_object().expect("test patch should be an object").clone()
    }

    mod create {
        use super::*;

        #[tokio::test]
        async fn assigns_an_id_and_stores_the_fields() {
            let store = MemoryStore::new();

            let stored = store
                .create(valid_person("Maria"))
                .await
                .expect("create should succeed");

            assert!(stored.id.is_well_formed());
            assert_eq!(stored.nome, "Maria");

            let found = store
                .find_by_id(&stored.id)
                .await
                .expect("find should succeed");

            assert_eq!(found, Some(stored));
        }

        #[tokio::test]
        async fn preserves_extra_fields() {
            let store = MemoryStore::new();

            let mut extra = Map::new();
            extra.insert("idade".to_string(), json!(30));

            let stored = store
                .create(ValidPerson {
                    nome: "Maria".to_string(),
                    extra,
                })
                .await
                .expect("create should succeed");

            assert_eq!(stored.extra.get("idade"), Some(&json!(30)));
        }
    }

    mod list_all {
        use super::*;

        #[tokio::test]
        async fn empty_store_lists_nothing() {
            let store = MemoryStore::new();

            let people = store.list_all().await.expect("list should succeed");

            assert!(people.is_empty());
        }

        #[tokio::test]
        async fn lists_every_stored_person() {
            let store = MemoryStore::new();

            store.create(valid_person("Maria")).await.expect("create");
            store.create(valid_person("João")).await.expect("create");

            let mut nomes: Vec<String> = store
                .list_all()
                .await
                .expect("list should succeed")
                .into_iter()
                .map(|person| person.nome)
                .collect();

            nomes.sort();

            assert_eq!(nomes, vec!["João".to_string(), "Maria".to_string()]);
        }
    }

    mod update {
        use super::*;

        #[tokio::test]
        async fn merges_patched_fields_and_keeps_the_rest() {
            let store = MemoryStore::new();

            let mut extra = Map::new();
            extra.insert("cidade".to_string(), json!("Porto"));

            let stored = store
                .create(ValidPerson {
                    nome: "Maria".to_string(),
                    extra,
                })
                .await
                .expect("create");

            let updated = store
                .update_by_id(&stored.id, patch(json!({ "nome": "Maria Silva" })))
                .await
                .expect("update should succeed")
                .expect("person should exist");

            // Only the patched field changed
            assert_eq!(updated.nome, "Maria Silva");
            assert_eq!(updated.extra.get("cidade"), Some(&json!("Porto")));
            assert_eq!(updated.id, stored.id);
        }

        #[tokio::test]
        async fn unknown_id_is_absent_not_an_error() {
            let store = MemoryStore::new();

            let result = store
                .update_by_id(&PersonId::new(), patch(json!({ "nome": "Maria" })))
                .await
                .expect("update should not error");

            assert_eq!(result, None);
        }

        #[tokio::test]
        async fn malformed_id_is_absent_even_with_a_bad_patch() {
            let store = MemoryStore::new();

            // Not-found wins over the patch rejection, matching the other
            // id lookup paths
            let result = store
                .update_by_id(&PersonId("not-a-uuid".to_string()), patch(json!({ "nome": "" })))
                .await
                .expect("update should not error");

            assert_eq!(result, None);
        }

        #[tokio::test]
        async fn empty_patch_answers_with_the_unchanged_document() {
            let store = MemoryStore::new();

            let stored = store.create(valid_person("Maria")).await.expect("create");

            let result = store
                .update_by_id(&stored.id, PersonPatch::new())
                .await
                .expect("update should succeed");

            assert_eq!(result, Some(stored));
        }

        #[tokio::test]
        async fn rejects_a_patch_that_blanks_nome() {
            let store = MemoryStore::new();

            let stored = store.create(valid_person("Maria")).await.expect("create");

            let error = store
                .update_by_id(&stored.id, patch(json!({ "nome": "" })))
                .await
                .expect_err("update should reject");

            assert_eq!(error, StoreError::constraint("nome", "must not be empty"));

            // And the stored document is untouched
            let found = store
                .find_by_id(&stored.id)
                .await
                .expect("find")
                .expect("person should exist");

            assert_eq!(found.nome, "Maria");
        }
    }

    mod delete {
        use super::*;

        #[tokio::test]
        async fn returns_the_removed_person_and_forgets_it() {
            let store = MemoryStore::new();

            let stored = store.create(valid_person("Maria")).await.expect("create");

            let removed = store
                .delete_by_id(&stored.id)
                .await
                .expect("delete should succeed");

            assert_eq!(removed, Some(stored.clone()));

            let found = store.find_by_id(&stored.id).await.expect("find");

            assert_eq!(found, None);
        }

        #[tokio::test]
        async fn deleting_twice_is_absent_the_second_time() {
            let store = MemoryStore::new();

            let stored = store.create(valid_person("Maria")).await.expect("create");

            store.delete_by_id(&stored.id).await.expect("first delete");

            let second = store
                .delete_by_id(&stored.id)
                .await
                .expect("second delete should not error");

            assert_eq!(second, None);
        }
    }
}
