use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::model::person::Person;

use super::store::StoreError;

/// Person documents are stored as one DynamoDB item per person, each JSON
/// field mapped onto the matching attribute type so extra fields survive
/// round-trips without a serialization envelope.

pub fn person_to_item(person: &Person) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let document = serde_json::to_value(person)
        .map_err(|err| StoreError::Backend(format!("could not encode person: {}", err)))?;

    match document {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(field, value)| (field, json_to_attribute(value)))
            .collect()),
        _ => Err(StoreError::Backend(
            "person did not encode to a document".to_string(),
        )),
    }
}

pub fn item_to_person(item: HashMap<String, AttributeValue>) -> Result<Person, StoreError> {
    let mut fields = Map::new();

    for (field, attribute) in item {
        fields.insert(field, attribute_to_json(attribute)?);
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|err| StoreError::Backend(format!("stored item is not a valid person: {}", err)))
}

pub fn json_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(json_to_attribute).collect())
        }
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(field, value)| (field, json_to_attribute(value)))
                .collect(),
        ),
    }
}

pub fn attribute_to_json(attribute: AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(flag)),
        AttributeValue::N(number) => number
            .parse::<Number>()
            .map(Value::Number)
            .map_err(|_| StoreError::Backend(format!("unreadable stored number: {}", number))),
        AttributeValue::S(text) => Ok(Value::String(text)),
        AttributeValue::L(values) => Ok(Value::Array(
            values
                .into_iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        )),
        AttributeValue::M(fields) => {
            let mut object = Map::new();

            for (field, value) in fields {
                object.insert(field, attribute_to_json(value)?);
            }

            Ok(Value::Object(object))
        }
        other => Err(StoreError::Backend(format!(
            "unsupported stored attribute type: {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::consts::consts::PersonId;

    use super::*;

    #[test]
    fn a_person_with_nested_extras_survives_the_item_mapping() {
        let person: Person = serde_json::from_value(json!({
            "id": PersonId::new().to_string(),
            "nome": "Maria",
            "idade": 30,
            "ativa": true,
            "endereco": { "cidade": "Porto", "numero": 12 },
            "apelidos": ["Mia", "Mari"],
        }))
        .expect("should deserialize");

        let item = person_to_item(&person).expect("should map to item");

        assert_eq!(
            item.get("nome"),
            Some(&AttributeValue::S("Maria".to_string()))
        );
        assert_eq!(item.get("idade"), Some(&AttributeValue::N("30".to_string())));

        let restored = item_to_person(item).expect("should map back");

        assert_eq!(restored, person);
    }

    #[test]
    fn unsupported_attribute_types_are_backend_errors() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("1".to_string()));
        item.insert("nome".to_string(), AttributeValue::S("Maria".to_string()));
        item.insert(
            "foto".to_string(),
            AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2, 3])),
        );

        let error = item_to_person(item).expect_err("should reject");

        assert!(matches!(error, StoreError::Backend(_)));
    }
}
