use std::collections::HashMap;

use aws_sdk_dynamodb::{
    error::{DisplayErrorContext, SdkError},
    types::{AttributeValue, ReturnValue},
    Client,
};

use crate::{
    consts::consts::PersonId,
    model::{
        person::Person,
        validate::{ValidPerson, ID_FIELD},
    },
};

use super::{
    attributes::{item_to_person, json_to_attribute, person_to_item},
    store::{sanitize_patch, PersonPatch, PersonStore, StoreError},
};

/// Durable backend: one DynamoDB item per person, partition key `id`.
/// Merge updates ride on DynamoDB's own single-item atomicity (a SET update
/// expression guarded by attribute_exists), no locking happens here.
pub struct DynamoDbStore {
    client: Client,
    table: String,
}

impl DynamoDbStore {
    /// Connects once at startup. The handle is cheap to share across
    /// concurrent requests afterwards, pool lifecycle is the SDK's.
    pub async fn connect(table: String) -> Result<Self, StoreError> {
        let sdk = aws_config::load_from_env().await;
        let client = Client::new(&sdk);

        client
            .describe_table()
            .table_name(&table)
            .send()
            .await
            .map_err(|err| StoreError::Connection(DisplayErrorContext(err).to_string()))?;

        Ok(Self { client, table })
    }

    fn id_key(id: &PersonId) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

fn into_backend_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

#[async_trait::async_trait]
impl PersonStore for DynamoDbStore {
    #[tracing::instrument(skip(self, person))]
    async fn create(&self, person: ValidPerson) -> Result<Person, StoreError> {
        let stored = Person::new(person.nome, person.extra);

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(person_to_item(&stored)?))
            .send()
            .await
            .map_err(into_backend_error)?;

        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Person>, StoreError> {
        let mut people = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(into_backend_error)?;

            for item in response.items() {
                people.push(item_to_person(item.clone())?);
            }

            start_key = match response.last_evaluated_key() {
                Some(key) => Some(key.clone()),
                None => break,
            };
        }

        Ok(people)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        if !id.is_well_formed() {
            return Ok(None);
        }

        let response = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ID_FIELD, Self::id_key(id))
            .send()
            .await
            .map_err(into_backend_error)?;

        match response.item {
            Some(item) => Ok(Some(item_to_person(item)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, StoreError> {
        if !id.is_well_formed() {
            return Ok(None);
        }

        let patch = sanitize_patch(patch)?;

        // An empty patch changes nothing, answer with the current document
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut names = HashMap::new();
        let mut values = HashMap::new();
        let mut assignments = Vec::new();

        for (position, (field, value)) in patch.into_iter().enumerate() {
            let name = format!("#f{}", position);
            let placeholder = format!(":v{}", position);

            assignments.push(format!("{} = {}", name, placeholder));
            names.insert(name, field);
            values.insert(placeholder, json_to_attribute(value));
        }

        names.insert("#id".to_string(), ID_FIELD.to_string());

        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(ID_FIELD, Self::id_key(id))
            .condition_expression("attribute_exists(#id)")
            .update_expression(format!("SET {}", assignments.join(", ")))
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err)
                if err
                    .as_service_error()
                    .map(|service| service.is_conditional_check_failed_exception())
                    .unwrap_or(false) =>
            {
                return Ok(None)
            }
            Err(err) => return Err(into_backend_error(err)),
        };

        match response.attributes {
            Some(item) => Ok(Some(item_to_person(item)?)),
            None => Err(StoreError::Backend(
                "update returned no document".to_string(),
            )),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        if !id.is_well_formed() {
            return Ok(None);
        }

        let result = self
            .client
            .delete_item()
            .table_name(&self.table)
            .key(ID_FIELD, Self::id_key(id))
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", ID_FIELD)
            .return_values(ReturnValue::AllOld)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err)
                if err
                    .as_service_error()
                    .map(|service| service.is_conditional_check_failed_exception())
                    .unwrap_or(false) =>
            {
                return Ok(None)
            }
            Err(err) => return Err(into_backend_error(err)),
        };

        match response.attributes {
            Some(item) => Ok(Some(item_to_person(item)?)),
            None => Err(StoreError::Backend(
                "delete returned no document".to_string(),
            )),
        }
    }
}
