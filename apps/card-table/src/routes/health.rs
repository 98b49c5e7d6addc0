use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use super::respond;
use crate::db::require_db;
use crate::entities::games;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    migrations: String,
    time: String,
}

/// 200 when the schema answers a query, 503 otherwise.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    db.execute_unprepared("SELECT 1").await.map_err(|e| {
        warn!(error = %e, "health check query failed");
        AppError::db_unavailable("Service failed health check")
    })?;
    games::Entity::find().count(db).await.map_err(|e| {
        warn!(error = %e, "health check schema probe failed");
        AppError::db_unavailable("Service failed health check")
    })?;

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(respond(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            app_version: env!("CARGO_PKG_VERSION"),
            db: "ok",
            migrations,
            time,
        },
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
