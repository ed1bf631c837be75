//! notekeep HTTP server entry point.
//!
//! Default: http://127.0.0.1:8080/api/notes

use notekeep_core::db::open_db;
use notekeep_core::{init_logging, logging_status, SqliteNoteStore};
use notekeep_server::{build_router, AppState, ServerConfig};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("notekeep-server: {err}");
            std::process::exit(1);
        }
    };

    let log_dir = config.log_dir.display().to_string();
    if let Err(err) = init_logging(&config.log_level, &log_dir) {
        eprintln!("notekeep-server: {err}");
        std::process::exit(1);
    }
    if let Some((level, dir)) = logging_status() {
        println!("notekeep-server: logging level={level} dir={}", dir.display());
    }

    if let Err(err) = run(config).await {
        log::error!("event=server_start module=server status=error error={err}");
        eprintln!("notekeep-server: {err}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteNoteStore::try_new(conn)?;
    let state = Arc::new(AppState::new(store));

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!(
        "event=server_start module=server status=ok addr={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
