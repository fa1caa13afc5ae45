use anyhow::Result;
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{DeleteResult, Document, Fields, UpdateResult, STATUS_APPROVED, STATUS_FIELD};

impl Database {
    pub async fn create_contact_request(&self, request: Fields) -> Result<Uuid> {
        self.insert(Collection::Contact, request).await
    }

    pub async fn get_contact_requests(&self) -> Result<Vec<Document>> {
        self.find_all(Collection::Contact).await
    }

    pub async fn get_contact_requests_by_email(&self, email: &str) -> Result<Vec<Document>> {
        self.find_by_field(Collection::Contact, "email", email).await
    }

    /// Sets `status` to "Approved"; every other field is left alone.
    pub async fn approve_contact_request(&self, id: Uuid) -> Result<UpdateResult> {
        let mut fields = Fields::new();
        fields.insert(
            STATUS_FIELD.to_string(),
            Value::String(STATUS_APPROVED.to_string()),
        );
        self.merge_by_id(Collection::Contact, id, fields).await
    }

    pub async fn delete_contact_request(&self, id: Uuid) -> Result<DeleteResult> {
        self.delete_by_id(Collection::Contact, id).await
    }
}
