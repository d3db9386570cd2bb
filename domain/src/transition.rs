//! Directed "comes after" edges between scenes.
//!
//! A transition is independent of chapter structure: any scene may lead to any
//! other scene, in any work. Outgoing transitions of a scene are sequenced by
//! `transition_order`, which is unique per source scene.

use crate::error::Error;
use crate::{scene_transitions, Id};
use entity_api::scene_transitions::ORDER_CONSTRAINT;
use entity_api::{scene, scene_transition};
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use service::config::Config;
use std::future::Future;
use utoipa::ToSchema;

pub use entity_api::scene_transition::{delete_by_id, find_by_id};

const FALLBACK_LABEL: &str = "Suivant";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTransition {
    #[schema(value_type = String, format = Uuid)]
    pub scene_before_id: Id,
    #[schema(value_type = String, format = Uuid)]
    pub scene_after_id: Id,
    /// Defaults to the title of the target scene
    pub transition_label: Option<String>,
    /// Defaults to one past the highest order among the source's transitions
    pub transition_order: Option<i32>,
}

pub fn validate_distinct(scene_before_id: Id, scene_after_id: Id) -> Result<(), Error> {
    if scene_before_id == scene_after_id {
        warn!("Rejected self transition on scene {scene_before_id}");
        return Err(Error::validation("A scene cannot follow itself"));
    }
    Ok(())
}

pub fn next_transition_order(max_order: Option<i32>) -> i32 {
    max_order.map_or(1, |max| max.saturating_add(1))
}

pub fn resolve_label(transition_label: Option<&str>, after_title: &str) -> String {
    [transition_label.unwrap_or_default(), after_title]
        .into_iter()
        .map(str::trim)
        .find(|label| !label.is_empty())
        .unwrap_or(FALLBACK_LABEL)
        .to_string()
}

// Only a collision on an order we picked ourselves is worth another attempt.
fn retries_on(violated_constraint: Option<&str>, order_was_computed: bool) -> bool {
    order_was_computed && violated_constraint == Some(ORDER_CONSTRAINT)
}

pub async fn create(
    db: &DatabaseConnection,
    config: &Config,
    new_transition: NewTransition,
) -> Result<scene_transitions::Model, Error> {
    validate_distinct(
        new_transition.scene_before_id,
        new_transition.scene_after_id,
    )?;

    let order_was_computed = new_transition.transition_order.is_none();
    let new_transition = &new_transition;

    retry_order_races(
        config.transition_create_retries,
        order_was_computed,
        move || try_create(db, new_transition),
    )
    .await
}

/// Runs `attempt` once, then again up to `retries` times while it loses a race
/// on a computed `transition_order`.
async fn retry_order_races<T, F, Fut>(
    retries: u32,
    order_was_computed: bool,
    mut attempt: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut retries_left = retries;

    loop {
        match attempt().await {
            Err(err)
                if retries_left > 0
                    && retries_on(err.violated_constraint(), order_was_computed) =>
            {
                retries_left -= 1;
                warn!("Transition order raced, retrying ({retries_left} left)");
            }
            result => return result,
        }
    }
}

async fn try_create(
    db: &DatabaseConnection,
    new_transition: &NewTransition,
) -> Result<scene_transitions::Model, Error> {
    let before_id = new_transition.scene_before_id;
    let after_id = new_transition.scene_after_id;

    let txn = db.begin().await?;

    let scenes = scene::find_by_ids(&txn, &[before_id, after_id]).await?;
    let after_scene = scenes.iter().find(|s| s.id == after_id);
    let after_title = match after_scene {
        Some(after_scene) if scenes.iter().any(|s| s.id == before_id) => &after_scene.title,
        _ => {
            debug!("Transition endpoints {before_id} -> {after_id} do not both exist");
            return Err(Error::not_found());
        }
    };

    let transition_label = resolve_label(new_transition.transition_label.as_deref(), after_title);

    let transition_order = match new_transition.transition_order {
        Some(order) => order,
        None => next_transition_order(scene_transition::max_order(&txn, before_id).await?),
    };

    if scene_transition::exists_pair(&txn, before_id, after_id).await? {
        return Err(Error::conflict());
    }

    let now = chrono::Utc::now();
    let transition = scene_transition::create(
        &txn,
        scene_transitions::Model {
            id: Id::nil(),
            scene_before_id: before_id,
            scene_after_id: after_id,
            transition_label,
            transition_order,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    txn.commit().await?;

    Ok(transition)
}

/// Transitions leaving `scene_id`, by ascending `transition_order`.
pub async fn list_outgoing(
    db: &DatabaseConnection,
    scene_id: Id,
) -> Result<Vec<scene_transitions::Model>, Error> {
    scene::find_by_id(db, scene_id).await?;

    Ok(scene_transition::find_by_scene_before(db, scene_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use crate::scene_type::SceneType;
    use crate::scenes;
    use clap::Parser;
    use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
    use entity_api::scene_transitions::PAIR_CONSTRAINT;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn config() -> Config {
        Config::parse_from(["story_platform"])
    }

    fn scene(title: &str, scene_type: SceneType, sort_order: i32) -> scenes::Model {
        let now = chrono::Utc::now();
        scenes::Model {
            id: Id::new_v4(),
            chapter_id: None,
            work_id: Some(Id::new_v4()),
            scene_type,
            custom_type_label: None,
            title: title.to_owned(),
            content_markdown: String::new(),
            order_hint: 0,
            sort_order,
            emoji: None,
            image_url: None,
            published_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn transition_between(
        before: &scenes::Model,
        after: &scenes::Model,
        label: &str,
        order: i32,
    ) -> scene_transitions::Model {
        let now = chrono::Utc::now();
        scene_transitions::Model {
            id: Id::new_v4(),
            scene_before_id: before.id,
            scene_after_id: after.id,
            transition_label: label.to_owned(),
            transition_order: order,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn no_max_order() -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("max_order", Value::Int(None))])
    }

    fn auto(before: &scenes::Model, after: &scenes::Model) -> NewTransition {
        NewTransition {
            scene_before_id: before.id,
            scene_after_id: after.id,
            transition_label: None,
            transition_order: None,
        }
    }

    fn race_on(constraint: &str) -> Error {
        EntityApiError {
            source: None,
            error_kind: EntityApiErrorKind::RecordConflict(Some(constraint.to_string())),
        }
        .into()
    }

    #[test]
    fn auto_orders_count_up_from_one() {
        assert_eq!(next_transition_order(None), 1);
        assert_eq!(next_transition_order(Some(1)), 2);
        assert_eq!(next_transition_order(Some(2)), 3);
        assert_eq!(next_transition_order(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn blank_label_falls_back_to_target_title_then_default() {
        assert_eq!(resolve_label(Some("Fuir"), "Intro"), "Fuir");
        assert_eq!(resolve_label(Some("   "), "Intro"), "Intro");
        assert_eq!(resolve_label(None, "Intro"), "Intro");
        assert_eq!(resolve_label(None, " "), FALLBACK_LABEL);
    }

    #[test]
    fn only_computed_order_collisions_are_retried() {
        assert!(retries_on(Some(ORDER_CONSTRAINT), true));
        assert!(!retries_on(Some(ORDER_CONSTRAINT), false));
        assert!(!retries_on(Some(PAIR_CONSTRAINT), true));
        assert!(!retries_on(None, true));
    }

    #[tokio::test]
    async fn self_transition_is_rejected_without_storage_access() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let id = Id::new_v4();

        let result = create(
            &db,
            &config(),
            NewTransition {
                scene_before_id: id,
                scene_after_id: id,
                transition_label: None,
                transition_order: None,
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Validation("A scene cannot follow itself".to_string())
        );
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn missing_endpoint_is_not_found() {
        let before = scene("A", SceneType::Standard, 1);
        let after = scene("B", SceneType::Standard, 2);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![before.clone()]])
            .into_connection();

        let result = create(&db, &config(), auto(&before, &after)).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_pair_is_a_conflict() {
        let before = scene("A", SceneType::Standard, 1);
        let after = scene("B", SceneType::Standard, 2);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![before.clone(), after.clone()]])
            .append_query_results([[no_max_order()]])
            .append_query_results(vec![vec![transition_between(&before, &after, "B", 1)]])
            .into_connection();

        let result = create(&db, &config(), auto(&before, &after)).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Conflict))
        );
    }

    #[tokio::test]
    async fn prologue_leads_into_the_first_scene() -> Result<(), Error> {
        let prologue = scene("Prologue", SceneType::Special, 100);
        let intro = scene("Intro", SceneType::Standard, 200);
        let stored = transition_between(&prologue, &intro, "Intro", 1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![prologue.clone(), intro.clone()]])
            .append_query_results([[no_max_order()]])
            .append_query_results(vec![Vec::<scene_transitions::Model>::new()])
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let transition = create(&db, &config(), auto(&prologue, &intro)).await?;

        assert_eq!(transition.transition_label, "Intro");
        assert_eq!(transition.transition_order, 1);
        assert_eq!(transition.scene_before_id, prologue.id);

        Ok(())
    }

    #[tokio::test]
    async fn auto_order_is_one_past_the_highest_existing_order() -> Result<(), Error> {
        let before = scene("Intro", SceneType::Standard, 200);
        let after = scene("La traversée", SceneType::Standard, 300);
        let stored = transition_between(&before, &after, "La traversée", 3);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![before.clone(), after.clone()]])
            .append_query_results([[BTreeMap::from([("max_order", Value::Int(Some(2)))])]])
            .append_query_results(vec![Vec::<scene_transitions::Model>::new()])
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let transition = create(&db, &config(), auto(&before, &after)).await?;
        assert_eq!(transition.transition_order, 3);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("Int(Some(3))"));
        assert!(log.contains("\"La traversée\""));

        Ok(())
    }

    #[tokio::test]
    async fn computed_order_race_is_retried_until_it_succeeds() {
        let mut attempts = 0;

        let result = retry_order_races(3, true, || {
            attempts += 1;
            std::future::ready(if attempts < 3 {
                Err(race_on(ORDER_CONSTRAINT))
            } else {
                Ok(attempts)
            })
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn retries_stop_at_the_configured_bound() {
        let mut attempts = 0;

        let result: Result<(), Error> = retry_order_races(2, true, || {
            attempts += 1;
            std::future::ready(Err(race_on(ORDER_CONSTRAINT)))
        })
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Conflict))
        );
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn explicit_order_and_pair_collisions_are_not_retried() {
        let mut attempts = 0;
        let explicit: Result<(), Error> = retry_order_races(3, false, || {
            attempts += 1;
            std::future::ready(Err(race_on(ORDER_CONSTRAINT)))
        })
        .await;
        assert!(explicit.is_err());
        assert_eq!(attempts, 1);

        let mut attempts = 0;
        let pair: Result<(), Error> = retry_order_races(3, true, || {
            attempts += 1;
            std::future::ready(Err(race_on(PAIR_CONSTRAINT)))
        })
        .await;
        assert!(pair.is_err());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn list_outgoing_for_unknown_scene_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<scenes::Model>::new()])
            .into_connection();

        let result = list_outgoing(&db, Id::new_v4()).await;

        assert!(result.unwrap_err().is_not_found());
    }
}
