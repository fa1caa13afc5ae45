//! Generic document operations shared by every collection.
//!
//! Each collection is a table of `(id, doc, created_at, updated_at)` where
//! `doc` holds the client document as JSONB. Table names come only from the
//! [`Collection`] enum; everything else is bound as a parameter.

use anyhow::Result;
use serde_json::Value;
use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::Database;
use crate::models::{DeleteResult, Document, Fields, UpdateResult};

/// Columns selected whenever a full document is read.
pub(crate) const DOCUMENT_FIELDS: &str = "id, doc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Biodatas,
    Stories,
    Checkout,
    Contact,
    Premium,
    Favourites,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Users,
        Collection::Biodatas,
        Collection::Stories,
        Collection::Checkout,
        Collection::Contact,
        Collection::Premium,
        Collection::Favourites,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Biodatas => "biodatas",
            Collection::Stories => "stories",
            Collection::Checkout => "checkout",
            Collection::Contact => "contact",
            Collection::Premium => "premium",
            Collection::Favourites => "favourites",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

pub(crate) fn map_row_to_document(row: &PgRow) -> Document {
    Document::new(row.get("id"), row.get::<Value, _>("doc"))
}

/// Builds a merge statement reporting Mongo-style matched/modified counts.
///
/// `predicate` selects the target rows and may reference `$1`; `$2` is the
/// JSONB object whose top-level keys replace the stored ones. Rows whose
/// document would not change are matched but not modified.
pub(crate) fn merge_statement(collection: Collection, predicate: &str) -> String {
    let table = collection.table();
    format!(
        r#"
        WITH target AS (
            SELECT id, doc FROM {table} WHERE {predicate} FOR UPDATE
        ), updated AS (
            UPDATE {table} AS c
            SET doc = c.doc || $2::jsonb, updated_at = NOW()
            FROM target
            WHERE c.id = target.id AND (target.doc || $2::jsonb) IS DISTINCT FROM target.doc
            RETURNING c.id
        )
        SELECT (SELECT COUNT(*) FROM target) AS matched,
               (SELECT COUNT(*) FROM updated) AS modified
        "#
    )
}

pub(crate) fn map_row_to_update_result(row: &PgRow) -> UpdateResult {
    UpdateResult::new(row.get("matched"), row.get("modified"))
}

impl Database {
    /// All documents in insertion order.
    pub async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at, id",
            DOCUMENT_FIELDS,
            collection.table()
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_row_to_document).collect())
    }

    pub async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            DOCUMENT_FIELDS,
            collection.table()
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(map_row_to_document))
    }

    /// Documents whose top-level `field`, rendered as text, equals `value`.
    pub async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE doc->>$1 = $2 ORDER BY created_at, id",
            DOCUMENT_FIELDS,
            collection.table()
        );
        let rows = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_row_to_document).collect())
    }

    pub async fn find_one_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE doc->>$1 = $2 ORDER BY created_at, id LIMIT 1",
            DOCUMENT_FIELDS,
            collection.table()
        );
        let row = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_row_to_document))
    }

    /// Existence guard: whether any document has `key_field == key_value`.
    ///
    /// This is a plain read. Creation paths rely on unique indexes through
    /// [`Database::insert_if_absent`] instead, which has no check-then-act gap.
    pub async fn exists(
        &self,
        collection: Collection,
        key_field: &str,
        key_value: &str,
    ) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE doc->>$1 = $2)",
            collection.table()
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(key_field)
            .bind(key_value)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn insert(&self, collection: Collection, fields: Fields) -> Result<Uuid> {
        let sql = format!(
            "INSERT INTO {} (doc) VALUES ($1) RETURNING id",
            collection.table()
        );
        let id: Uuid = sqlx::query_scalar(&sql)
            .bind(Value::Object(fields))
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Inserts unless a unique index on the collection already holds the
    /// document's key. Returns `None` when the key is taken.
    pub async fn insert_if_absent(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<Option<Uuid>> {
        let sql = format!(
            "INSERT INTO {} (doc) VALUES ($1) ON CONFLICT DO NOTHING RETURNING id",
            collection.table()
        );
        let id: Option<Uuid> = sqlx::query_scalar(&sql)
            .bind(Value::Object(fields))
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Sets the given top-level fields on the document with this id.
    pub async fn merge_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Fields,
    ) -> Result<UpdateResult> {
        let sql = merge_statement(collection, "id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(fields))
            .fetch_one(&self.pool)
            .await?;
        Ok(map_row_to_update_result(&row))
    }

    pub async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<DeleteResult> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(DeleteResult::new(result.rows_affected() as i64))
    }

    pub async fn delete_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<DeleteResult> {
        let sql = format!("DELETE FROM {} WHERE doc->>$1 = $2", collection.table());
        let result = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult::new(result.rows_affected() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_collection_has_a_distinct_table() {
        let mut tables: Vec<_> = Collection::ALL.iter().map(|c| c.table()).collect();
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), Collection::ALL.len());
    }

    #[test]
    fn merge_statement_targets_requested_table() {
        let sql = merge_statement(Collection::Contact, "id = $1");
        assert!(sql.contains("FROM contact WHERE id = $1 FOR UPDATE"));
        assert!(sql.contains("UPDATE contact AS c"));
        assert!(sql.contains("AS matched"));
        assert!(sql.contains("AS modified"));
    }
}
