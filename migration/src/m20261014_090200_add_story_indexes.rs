use sea_orm_migration::prelude::*;

const SCHEMA: &str = "story_app";

#[derive(DeriveMigrationName)]
pub struct Migration;

fn table(name: &str) -> (Alias, Alias) {
    (Alias::new(SCHEMA), Alias::new(name))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A source scene links to a given target at most once
        manager
            .create_index(
                Index::create()
                    .name("scene_transitions_pair_key")
                    .table(table("scene_transitions"))
                    .col(Alias::new("scene_before_id"))
                    .col(Alias::new("scene_after_id"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Outgoing transitions of a scene never share an order
        manager
            .create_index(
                Index::create()
                    .name("scene_transitions_order_key")
                    .table(table("scene_transitions"))
                    .col(Alias::new("scene_before_id"))
                    .col(Alias::new("transition_order"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("scenes_sort_order")
                    .table(table("scenes"))
                    .col(Alias::new("sort_order"))
                    .col(Alias::new("order_hint"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("scenes_chapter_id")
                    .table(table("scenes"))
                    .col(Alias::new("chapter_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("scenes_work_id")
                    .table(table("scenes"))
                    .col(Alias::new("work_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("chapters_work_id_order_hint")
                    .table(table("chapters"))
                    .col(Alias::new("work_id"))
                    .col(Alias::new("order_hint"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let indexes = [
            ("scene_transitions_pair_key", "scene_transitions"),
            ("scene_transitions_order_key", "scene_transitions"),
            ("scenes_sort_order", "scenes"),
            ("scenes_chapter_id", "scenes"),
            ("scenes_work_id", "scenes"),
            ("chapters_work_id_order_hint", "chapters"),
        ];

        for (name, table_name) in indexes {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(table(table_name))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
