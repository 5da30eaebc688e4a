pub mod app;
pub mod handlers;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::seed_data::{seed_from_csv, SeedSummary};
use crate::database::{establish_connection, get_database_url, setup_database};

/// Opens the database and makes sure both tables exist.
pub async fn open_database(database_path: &str) -> Result<DatabaseConnection> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;
    setup_database(&db).await?;
    Ok(db)
}

pub async fn seed_database(db: &DatabaseConnection, config: &ServerConfig) -> Result<SeedSummary> {
    let summary = seed_from_csv(db, &config.regions_csv(), &config.events_csv()).await?;
    info!(
        "Seed data loaded: {} regions, {} events inserted",
        summary.regions_inserted, summary.events_inserted
    );
    Ok(summary)
}

pub async fn start_server(config: &ServerConfig) -> Result<()> {
    let db = open_database(&config.database).await?;

    if config.seed {
        seed_database(&db, config).await?;
    }

    let app = app::create_app(db, config.cors_origin.as_deref())?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  GET    /health             - Health check");
    info!("  GET    /regions            - List regions");
    info!("  POST   /regions            - Add a region");
    info!("  GET    /regions/{{code}}     - Region by NOC code");
    info!("  PATCH  /regions/{{code}}     - Update region fields");
    info!("  DELETE /regions/{{code}}     - Delete a region");
    info!("  GET    /events             - List events");
    info!("  POST   /events             - Add an event");
    info!("  GET    /events/{{id}}        - Event by id");
    info!("  PATCH  /events/{{id}}        - Update event fields");
    info!("  DELETE /events/{{id}}        - Delete an event");
}
