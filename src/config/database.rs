use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::config::Settings;

/// Connect to the configured database and bring the schema up to date
pub async fn connect(settings: &Settings) -> Result<DatabaseConnection, DbErr> {
    tracing::info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    Ok(db)
}
