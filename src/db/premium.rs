use anyhow::Result;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{DeleteResult, Document, Fields, BIO_DATA_ID_FIELD};

impl Database {
    pub async fn create_premium_request(&self, request: Fields) -> Result<Uuid> {
        self.insert(Collection::Premium, request).await
    }

    pub async fn get_premium_requests(&self) -> Result<Vec<Document>> {
        self.find_all(Collection::Premium).await
    }

    /// Removes every premium request for the given biodata number.
    pub async fn delete_premium_requests(&self, bio_data_id: &str) -> Result<DeleteResult> {
        self.delete_by_field(Collection::Premium, BIO_DATA_ID_FIELD, bio_data_id)
            .await
    }
}
