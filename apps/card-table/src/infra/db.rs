use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

/// Connect without running migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, kind, owner)?;

    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if kind == DbKind::SqliteMemory {
        // each pooled connection would otherwise open its own empty database
        opt.min_connections(1).max_connections(1);
    }

    let conn = Database::connect(opt)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect to database: {e}")))?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    // in-memory and file databases have no separate owner role
    let owner = match kind {
        DbKind::Postgres => DbOwner::Owner,
        DbKind::SqliteFile | DbKind::SqliteMemory => DbOwner::App,
    };
    let conn = connect_db(env, kind, owner).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;

    info!(env = ?env, db_kind = ?kind, "database ready");
    Ok(conn)
}

/// Run one migration command as the schema owner. Backs the `migration` binary.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    if kind == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory databases do not outlive the process; migrate a file or postgres database",
        ));
    }
    let owner = match kind {
        DbKind::Postgres => DbOwner::Owner,
        DbKind::SqliteFile | DbKind::SqliteMemory => DbOwner::App,
    };

    info!(env = ?env, db_kind = ?kind, cmd = ?command, "migrate=start");
    let conn = connect_db(env, kind, owner).await?;
    migrate(&conn, command)
        .await
        .map_err(|e| AppError::config(format!("migration execution failed: {e}")))?;
    info!("migrate=done");
    Ok(())
}
