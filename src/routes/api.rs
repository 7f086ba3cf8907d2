use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::repository::CharacterReader;
use crate::services::ServiceError;
use crate::services::api::{CharactersQuery, list_characters};

#[get("/v1/characters")]
pub async fn api_v1_characters(
    params: web::Query<CharactersQuery>,
    repo: web::Data<dyn CharacterReader>,
) -> impl Responder {
    match list_characters(repo.get_ref(), params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err @ (ServiceError::Form(_) | ServiceError::TypeConstraint(_))) => {
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
        }
        Err(err @ ServiceError::Upstream(_)) => {
            HttpResponse::BadGateway().json(json!({ "error": err.to_string() }))
        }
        Err(err) => {
            log::error!("Failed to serve characters: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
