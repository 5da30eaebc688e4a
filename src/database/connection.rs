use sea_orm::sea_query::{ColumnDef, Index, Table, TableCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

use super::entities::{events, regions};

pub const DEFAULT_DATABASE_PATH: &str = "paralympics.sqlite";

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    // SQLite serialises writes, a small pool is enough
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => format!("sqlite://{}?mode=rwc", DEFAULT_DATABASE_PATH),
    }
}

/// Creates the region and event tables when they are missing.
///
/// Existing tables are left untouched, so this is safe to run on every start.
pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    db.execute(backend.build(&region_table())).await?;
    db.execute(backend.build(&event_table())).await?;
    let noc_index = Index::create()
        .name("idx_event_noc")
        .table(events::Entity)
        .col(events::Column::Noc)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&noc_index)).await?;

    info!("Database schema ready");
    Ok(())
}

fn region_table() -> TableCreateStatement {
    Table::create()
        .table(regions::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(regions::Column::Noc)
                .string_len(3)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(regions::Column::Region).string().not_null())
        .col(ColumnDef::new(regions::Column::Notes).string())
        .to_owned()
}

// event.NOC is indexed but carries no FOREIGN KEY constraint.
fn event_table() -> TableCreateStatement {
    Table::create()
        .table(events::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(events::Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(events::Column::EventType).string().not_null())
        .col(ColumnDef::new(events::Column::Year).integer().not_null())
        .col(ColumnDef::new(events::Column::Country).string().not_null())
        .col(ColumnDef::new(events::Column::Host).string().not_null())
        .col(ColumnDef::new(events::Column::Noc).string_len(3).not_null())
        .col(ColumnDef::new(events::Column::Start).string())
        .col(ColumnDef::new(events::Column::End).string())
        .col(ColumnDef::new(events::Column::Duration).integer())
        .col(ColumnDef::new(events::Column::DisabilitiesIncluded).string())
        .col(ColumnDef::new(events::Column::Countries).integer())
        .col(ColumnDef::new(events::Column::Events).integer())
        .col(ColumnDef::new(events::Column::Sports).integer())
        .col(ColumnDef::new(events::Column::ParticipantsM).integer())
        .col(ColumnDef::new(events::Column::ParticipantsF).integer())
        .col(ColumnDef::new(events::Column::Participants).integer())
        .col(ColumnDef::new(events::Column::Highlights).text())
        .to_owned()
}
