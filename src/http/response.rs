use actix_web::{http::StatusCode, HttpResponse};
use serde_json::{json, Value};

use crate::model::outcome::PersonOutcome;

pub const REMOVED_MESSAGE: &str = "Pessoa removida com sucesso";
pub const NOT_FOUND_MESSAGE: &str = "Pessoa não encontrada";

/// The single place where internal outcomes become externally visible
/// status + payload pairs. The match is exhaustive on purpose, a new
/// outcome variant must be given a row here before the crate compiles.
pub fn to_response(outcome: PersonOutcome) -> (StatusCode, Value) {
    match outcome {
        PersonOutcome::Created(person) => (StatusCode::CREATED, json!(person)),
        PersonOutcome::Found(person) => (StatusCode::OK, json!(person)),
        PersonOutcome::FoundAll(people) => (StatusCode::OK, json!(people)),
        PersonOutcome::Updated(person) => (StatusCode::OK, json!(person)),
        PersonOutcome::Deleted(_) => (StatusCode::OK, json!({ "message": REMOVED_MESSAGE })),
        PersonOutcome::Absent(_) => (StatusCode::NOT_FOUND, json!({ "error": NOT_FOUND_MESSAGE })),
        PersonOutcome::ValidationFailed(error) => {
            (StatusCode::BAD_REQUEST, json!({ "error": error.to_string() }))
        }
        PersonOutcome::PersistenceFailed(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    }
}

pub fn respond(outcome: PersonOutcome) -> HttpResponse {
    let (status, payload) = to_response(outcome);

    HttpResponse::build(status).json(payload)
}
