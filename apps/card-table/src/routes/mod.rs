use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::Value;

use crate::domain::changes::ChangeSet;
use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod cards;
pub mod commands;
pub mod games;
pub mod health;
pub mod stacks;

/// Successful payloads are wrapped as `{"data": ...}`
#[derive(Debug, Serialize)]
struct Envelope<T> {
    data: T,
}

pub(crate) fn respond<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(Envelope { data })
}

/// Request bodies are change-sets; anything but a JSON object is rejected.
pub(crate) fn change_set(body: Value) -> Result<ChangeSet, AppError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body must be a JSON object",
        )),
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Malformed JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

/// Register every route. Used by `main.rs` and by tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/games").configure(games::configure_routes));
    cfg.service(web::scope("/stacks").configure(stacks::configure_routes));
    cfg.service(web::scope("/cards").configure(cards::configure_routes));
    cfg.service(web::scope("/commands").configure(commands::configure_routes));
}
