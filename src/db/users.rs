use anyhow::Result;
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{Document, Fields, UpdateResult, PREMIUM_FIELD, ROLE_ADMIN, ROLE_FIELD};

impl Database {
    /// Inserts a user unless one with the same email exists. Returns the new
    /// id, or `None` if the email is already registered.
    pub async fn create_user(&self, user: Fields) -> Result<Option<Uuid>> {
        self.insert_if_absent(Collection::Users, user).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<Document>> {
        self.find_all(Collection::Users).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<Document>> {
        self.find_one_by_field(Collection::Users, "email", email).await
    }

    pub async fn user_exists(&self, email: &str) -> Result<bool> {
        self.exists(Collection::Users, "email", email).await
    }

    pub async fn make_admin(&self, id: Uuid) -> Result<UpdateResult> {
        let mut fields = Fields::new();
        fields.insert(ROLE_FIELD.to_string(), Value::String(ROLE_ADMIN.to_string()));
        self.merge_by_id(Collection::Users, id, fields).await
    }

    pub async fn make_premium(&self, id: Uuid) -> Result<UpdateResult> {
        let mut fields = Fields::new();
        fields.insert(PREMIUM_FIELD.to_string(), Value::Bool(true));
        self.merge_by_id(Collection::Users, id, fields).await
    }

    /// Creates an admin account for `email`, or promotes the existing one.
    pub async fn ensure_admin(&self, email: &str) -> Result<Uuid> {
        if let Some(existing) = self.get_user_by_email(email).await? {
            if existing.get_str(ROLE_FIELD) != Some(ROLE_ADMIN) {
                self.make_admin(existing.id).await?;
            }
            return Ok(existing.id);
        }

        let mut fields = Fields::new();
        fields.insert("email".to_string(), Value::String(email.to_string()));
        fields.insert(ROLE_FIELD.to_string(), Value::String(ROLE_ADMIN.to_string()));
        match self.create_user(fields).await? {
            Some(id) => Ok(id),
            // registered concurrently; promote whoever won
            None => {
                let user = self
                    .get_user_by_email(email)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("user {} vanished during seeding", email))?;
                self.make_admin(user.id).await?;
                Ok(user.id)
            }
        }
    }
}
