use actix_web::{web, App, HttpServer};
use card_table::config::db::{DbKind, RuntimeEnv};
use card_table::infra::state::build_state;
use card_table::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use card_table::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("CARD_TABLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("CARD_TABLE_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("CARD_TABLE_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid database selection");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };
    info!(db = ?db_kind, "database connected and migrated");

    let data = web::Data::new(app_state);

    info!(%host, port, "starting card-table");
    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
