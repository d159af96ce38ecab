use actix_web::{delete, get, post, put, web, Responder};
use serde_json::{Map, Value};

use crate::{consts::consts::PersonId, service::PersonService};

use super::response::respond;

/// Thin transport binding: parse path/body, hand off to the service, let
/// the response mapper pick status and payload.

#[post("/pessoas")]
async fn create_person(
    service: web::Data<PersonService>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    respond(service.create_person(body.into_inner()).await)
}

#[get("/pessoas")]
async fn list_people(service: web::Data<PersonService>) -> impl Responder {
    respond(service.list_people().await)
}

#[get("/pessoas/{id}")]
async fn get_person(service: web::Data<PersonService>, path: web::Path<String>) -> impl Responder {
    respond(service.get_person(PersonId(path.into_inner())).await)
}

#[put("/pessoas/{id}")]
async fn update_person(
    service: web::Data<PersonService>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    respond(
        service
            .update_person(PersonId(path.into_inner()), body.into_inner())
            .await,
    )
}

#[delete("/pessoas/{id}")]
async fn delete_person(
    service: web::Data<PersonService>,
    path: web::Path<String>,
) -> impl Responder {
    respond(service.delete_person(PersonId(path.into_inner())).await)
}

pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(create_person)
        .service(list_people)
        .service(get_person)
        .service(update_person)
        .service(delete_person);
}
