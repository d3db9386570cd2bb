use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "CREATE TYPE story_app.scene_type AS ENUM ('standard', 'special');",
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE story_app.works (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                title VARCHAR(255) NOT NULL,
                description TEXT,
                episode_label VARCHAR(50) NOT NULL DEFAULT 'Épisode',
                chapter_label VARCHAR(50) NOT NULL DEFAULT 'Chapitre',
                published BOOLEAN NOT NULL DEFAULT FALSE,
                published_date DATE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            );
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE story_app.chapters (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                work_id UUID NOT NULL REFERENCES story_app.works (id) ON DELETE CASCADE,
                number INTEGER,
                title VARCHAR(255) NOT NULL,
                order_hint INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            );
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE story_app.scenes (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                chapter_id UUID REFERENCES story_app.chapters (id) ON DELETE CASCADE,
                work_id UUID REFERENCES story_app.works (id) ON DELETE CASCADE,
                scene_type story_app.scene_type NOT NULL DEFAULT 'standard',
                custom_type_label VARCHAR(100),
                title VARCHAR(255) NOT NULL,
                content_markdown TEXT NOT NULL,
                order_hint INTEGER NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0,
                emoji VARCHAR(16),
                image_url TEXT,
                published_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT scenes_special_without_chapter
                    CHECK (scene_type <> 'special' OR chapter_id IS NULL)
            );
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE story_app.scene_transitions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                scene_before_id UUID NOT NULL REFERENCES story_app.scenes (id) ON DELETE CASCADE,
                scene_after_id UUID NOT NULL REFERENCES story_app.scenes (id) ON DELETE CASCADE,
                transition_label VARCHAR(255) NOT NULL,
                transition_order INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT scene_transitions_no_self_loop
                    CHECK (scene_before_id <> scene_after_id)
            );
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Reverse dependency order
        for table in ["scene_transitions", "scenes", "chapters", "works"] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS story_app.{table};"))
                .await?;
        }

        db.execute_unprepared("DROP TYPE IF EXISTS story_app.scene_type;")
            .await?;

        Ok(())
    }
}
