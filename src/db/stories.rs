use anyhow::Result;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{Document, Fields};

impl Database {
    /// Inserts a story unless this `userEmail` already has one.
    pub async fn create_story(&self, story: Fields) -> Result<Option<Uuid>> {
        self.insert_if_absent(Collection::Stories, story).await
    }

    pub async fn get_all_stories(&self) -> Result<Vec<Document>> {
        self.find_all(Collection::Stories).await
    }
}
