//! `/commands` routes. Creating a command executes it.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use super::{change_set, respond};
use crate::commands::OsDraws;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::commands::{self as commands_repo, CommandFilter};
use crate::services::{CommandService, CommandView};
use crate::state::app_state::AppState;

async fn list_commands(
    req: HttpRequest,
    filter: web::Query<CommandFilter>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = filter.into_inner();
    let commands = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            commands_repo::list(txn, &filter).await.map_err(AppError::from)
        })
    })
    .await?;
    let views: Vec<CommandView> = commands.into_iter().map(CommandView::from).collect();
    Ok(respond(StatusCode::OK, views))
}

async fn get_command(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let command = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            commands_repo::require(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, CommandView::from(command)))
}

/// The command row and every mutation its operation makes share one
/// transaction; a failed operation leaves no command behind.
async fn create_command(
    req: HttpRequest,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = change_set(body.into_inner())?;
    let outcome = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            let mut draws = OsDraws::new();
            CommandService::new()
                .create(txn, &body, &mut draws)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::CREATED, outcome))
}

async fn patch_command(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = change_set(body.into_inner())?;
    let command = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            CommandService::new().patch(txn, id, &body).await.map_err(AppError::from)
        })
    })
    .await?;
    Ok(respond(StatusCode::OK, command))
}

async fn delete_command(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            commands_repo::delete(txn, id).await.map_err(AppError::from)
        })
    })
    .await?;
    if !deleted {
        return Err(AppError::not_found(
            ErrorCode::CommandNotFound,
            format!("Command {id} not found"),
        ));
    }
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_commands))
            .route(web::post().to(create_command)),
    )
    .service(
        web::resource("/{command_id}")
            .route(web::get().to(get_command))
            .route(web::patch().to(patch_command))
            .route(web::delete().to(delete_command)),
    );
}
