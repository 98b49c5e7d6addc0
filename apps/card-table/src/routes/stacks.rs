//! `/stacks` routes.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use super::{change_set, respond};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::stacks::{self as stacks_repo, StackFilter};
use crate::services::StackService;
use crate::state::app_state::AppState;

async fn list_stacks(
    req: HttpRequest,
    filter: web::Query<StackFilter>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = filter.into_inner();
    let stacks = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            stacks_repo::list(txn, &filter).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, stacks))
}

async fn get_stack(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let stack = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            stacks_repo::require(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, stack))
}

async fn create_stack(
    req: HttpRequest,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = change_set(body.into_inner())?;
    let stack = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            StackService::new().create(txn, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::CREATED, stack))
}

async fn patch_stack(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = change_set(body.into_inner())?;
    let stack = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            StackService::new().patch(txn, id, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, stack))
}

async fn delete_stack(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            stacks_repo::delete(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    if !deleted {
        return Err(AppError::not_found(
            ErrorCode::StackNotFound,
            format!("Stack {id} not found"),
        ));
    }
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_stacks))
            .route(web::post().to(create_stack)),
    )
    .service(
        web::resource("/{stack_id}")
            .route(web::get().to(get_stack))
            .route(web::patch().to(patch_stack))
            .route(web::delete().to(delete_stack)),
    );
}
