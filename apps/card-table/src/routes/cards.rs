//! `/cards` routes.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use super::{change_set, respond};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::cards::{self as cards_repo, CardFilter};
use crate::services::CardService;
use crate::state::app_state::AppState;

async fn list_cards(
    req: HttpRequest,
    filter: web::Query<CardFilter>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = filter.into_inner();
    let cards = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            cards_repo::list(txn, &filter).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, cards))
}

async fn get_card(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let card = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            cards_repo::require(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, card))
}

async fn create_card(
    req: HttpRequest,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = change_set(body.into_inner())?;
    let card = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            CardService::new().create(txn, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::CREATED, card))
}

async fn patch_card(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = change_set(body.into_inner())?;
    let card = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            CardService::new().patch(txn, id, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, card))
}

async fn delete_card(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            cards_repo::delete(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    if !deleted {
        return Err(AppError::not_found(
            ErrorCode::CardNotFound,
            format!("Card {id} not found"),
        ));
    }
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_cards))
            .route(web::post().to(create_card)),
    )
    .service(
        web::resource("/{card_id}")
            .route(web::get().to(get_card))
            .route(web::patch().to(patch_card))
            .route(web::delete().to(delete_card)),
    );
}
