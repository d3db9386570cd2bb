//! Scene payloads enriched with their chapter.

use domain::chapters::Model as ChapterModel;
use domain::scenes::Model as SceneModel;
use serde::Serialize;
use utoipa::ToSchema;

/// A scene with the title and number of its chapter, both null for special scenes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SceneWithChapter {
    #[serde(flatten)]
    pub scene: SceneModel,
    pub chapter_title: Option<String>,
    pub chapter_number: Option<i32>,
}

impl From<(SceneModel, Option<ChapterModel>)> for SceneWithChapter {
    fn from((scene, chapter): (SceneModel, Option<ChapterModel>)) -> Self {
        let (chapter_title, chapter_number) = match chapter {
            Some(chapter) => (Some(chapter.title), chapter.number),
            None => (None, None),
        };

        Self {
            scene,
            chapter_title,
            chapter_number,
        }
    }
}
