use anyhow::Result;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{DeleteResult, Document, Fields};

impl Database {
    pub async fn create_favourite(&self, favourite: Fields) -> Result<Uuid> {
        self.insert(Collection::Favourites, favourite).await
    }

    pub async fn get_favourites_by_email(&self, email: &str) -> Result<Vec<Document>> {
        self.find_by_field(Collection::Favourites, "email", email).await
    }

    pub async fn delete_favourite(&self, id: Uuid) -> Result<DeleteResult> {
        self.delete_by_id(Collection::Favourites, id).await
    }
}
