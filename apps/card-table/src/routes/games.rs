//! `/games` routes.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use super::{change_set, respond};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games::{self as games_repo, GameFilter};
use crate::services::GameService;
use crate::state::app_state::AppState;

async fn list_games(
    req: HttpRequest,
    filter: web::Query<GameFilter>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = filter.into_inner();
    let games = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            games_repo::list(txn, &filter).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, games))
}

async fn get_game(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let game = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            games_repo::require(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, game))
}

async fn create_game(
    req: HttpRequest,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = change_set(body.into_inner())?;
    let game = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            GameService::new().create(txn, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::CREATED, game))
}

async fn patch_game(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = change_set(body.into_inner())?;
    let game = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            GameService::new().patch(txn, id, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, game))
}

async fn delete_game(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            games_repo::delete(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    if !deleted {
        return Err(AppError::not_found(
            ErrorCode::GameNotFound,
            format!("Game {id} not found"),
        ));
    }
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    )
    .service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::patch().to(patch_game))
            .route(web::delete().to(delete_game)),
    );
}
