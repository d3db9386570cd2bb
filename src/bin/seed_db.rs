use domain::chapter::NewChapter;
use domain::error::Error;
use domain::scene::NewScene;
use domain::scene_type::SceneType;
use domain::transition::NewTransition;
use domain::work::NewWork;
use domain::{chapter, scene, transition, work};
use log::{error, info};
use sea_orm::DatabaseConnection;
use service::{config::Config, logging::Logger};

// One work with a prologue and a chapter of two scenes, linked in reading order.
async fn seed(db: &DatabaseConnection, config: &Config) -> Result<(), Error> {
    let work = work::create(
        db,
        NewWork {
            title: Some("Les Chroniques d'Ether".to_owned()),
            description: Some("Un voyage à travers les terres flottantes.".to_owned()),
            ..Default::default()
        },
    )
    .await?;
    info!("Seeded work {} ({})", work.title, work.id);

    let first_chapter = chapter::create(
        db,
        NewChapter {
            work_id: Some(work.id),
            number: Some(1),
            order_hint: Some(1),
            ..Default::default()
        },
    )
    .await?;
    info!("Seeded chapter {}", first_chapter.title);

    let prologue = scene::create(
        db,
        NewScene {
            work_id: Some(work.id),
            scene_type: SceneType::Special,
            custom_type_label: Some("Prologue".to_owned()),
            content_markdown: Some("Avant les vents, il y avait le silence.".to_owned()),
            sort_order: Some(100),
            emoji: Some("🌫️".to_owned()),
            ..Default::default()
        },
    )
    .await?;

    let intro = scene::create(
        db,
        NewScene {
            chapter_id: Some(first_chapter.id),
            title: Some("Intro".to_owned()),
            content_markdown: Some("Le port d'Ether s'éveille.".to_owned()),
            sort_order: Some(200),
            order_hint: Some(1),
            ..Default::default()
        },
    )
    .await?;

    let crossing = scene::create(
        db,
        NewScene {
            chapter_id: Some(first_chapter.id),
            title: Some("La traversée".to_owned()),
            content_markdown: Some("Le navire quitte les quais.".to_owned()),
            sort_order: Some(300),
            order_hint: Some(2),
            ..Default::default()
        },
    )
    .await?;
    info!(
        "Seeded scenes {}, {} and {}",
        prologue.title, intro.title, crossing.title
    );

    for (before, after, label) in [
        (&prologue, &intro, None),
        (&intro, &crossing, Some("Embarquer".to_owned())),
    ] {
        let link = transition::create(
            db,
            config,
            NewTransition {
                scene_before_id: before.id,
                scene_after_id: after.id,
                transition_label: label,
                transition_order: None,
            },
        )
        .await?;
        info!(
            "Seeded transition {} -> {} \"{}\" (#{})",
            before.title, after.title, link.transition_label, link.transition_order
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!("Seeding database [{}]...", config.database_url());

    let db = match service::init_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = seed(&db, &config).await {
        error!("Seeding failed: {e}");
        std::process::exit(1);
    }

    info!("Seeding complete");
}
