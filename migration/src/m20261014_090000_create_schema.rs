use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every table of the application lives in its own schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS story_app;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO story_app, public;")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // CASCADE removes every object left in the schema
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS story_app CASCADE;")
            .await?;

        Ok(())
    }
}
