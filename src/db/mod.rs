pub mod entities;
pub mod repositories;

pub use entities::*;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::error::Result;

/// Ensure the `files` and `songs` tables exist.
///
/// Safe to call on every start: migrations that were already applied are skipped.
pub async fn create_schema(db: &DatabaseConnection) -> Result<()> {
    migration::Migrator::up(db, None).await?;
    tracing::debug!("Schema is up to date");
    Ok(())
}

/// Drop every table created by [`create_schema`], data included.
pub async fn drop_schema(db: &DatabaseConnection) -> Result<()> {
    migration::Migrator::down(db, None).await?;
    tracing::debug!("Schema dropped");
    Ok(())
}
