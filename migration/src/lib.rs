pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

mod m20261014_090000_create_schema;
mod m20261014_090100_create_story_tables;
mod m20261014_090200_add_story_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261014_090000_create_schema::Migration),
            Box::new(m20261014_090100_create_story_tables::Migration),
            Box::new(m20261014_090200_add_story_indexes::Migration),
        ]
    }
}

/// Connections search only `story_app`, so the schema must exist before the
/// migrator creates its bookkeeping table there.
pub async fn prepare_schema(db: &impl ConnectionTrait) -> Result<(), DbErr> {
    db.execute_unprepared("CREATE SCHEMA IF NOT EXISTS story_app;")
        .await?;
    Ok(())
}
