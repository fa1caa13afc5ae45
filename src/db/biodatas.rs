use anyhow::{anyhow, Result};
use serde_json::Value;
use sqlx::{Postgres, QueryBuilder, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use super::collections::{map_row_to_document, map_row_to_update_result, merge_statement, DOCUMENT_FIELDS};
use super::{BiodataFilter, Collection, Database};
use crate::models::{
    BiodataWriteOutcome, Document, Fields, InsertOneResult, BIODATA_ID_FIELD, BIODATA_TYPE_FIELD,
    USER_ID_FIELD,
};

/// Maximum number of biodatas returned for a category listing.
pub const CATEGORY_LIMIT: i64 = 3;

const BIODATA_COUNTER: &str = "biodataId";

/// Next sequential biodata number: one past the larger of the counter's
/// high-water mark and the current maximum, so numbers are never reused.
/// The counter row stays locked until the surrounding transaction ends,
/// serializing concurrent creations.
async fn next_biodata_id(tx: &mut Transaction<'_, Postgres>) -> Result<i64> {
    let value: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO counters (name, value)
        VALUES ($1, (SELECT COALESCE(MAX(biodata_id), 0) FROM biodatas) + 1)
        ON CONFLICT (name) DO UPDATE
        SET value = GREATEST(counters.value, (SELECT COALESCE(MAX(biodata_id), 0) FROM biodatas)) + 1
        RETURNING value
        "#,
    )
    .bind(BIODATA_COUNTER)
    .fetch_one(&mut **tx)
    .await?;
    Ok(value)
}

impl Database {
    pub async fn list_biodatas(&self, filter: &BiodataFilter) -> Result<Vec<Document>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(DOCUMENT_FIELDS);
        query.push(" FROM biodatas");
        filter.push_where(&mut query);
        query.push(" ORDER BY biodata_id");

        let rows = query.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_row_to_document).collect())
    }

    /// At most [`CATEGORY_LIMIT`] biodatas of one type, lowest numbers first.
    pub async fn list_biodatas_by_category(&self, category: &str) -> Result<Vec<Document>> {
        let sql = format!(
            "SELECT {} FROM biodatas WHERE doc->>'{}' = $1 ORDER BY biodata_id LIMIT $2",
            DOCUMENT_FIELDS, BIODATA_TYPE_FIELD
        );
        let rows = sqlx::query(&sql)
            .bind(category)
            .bind(CATEGORY_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_row_to_document).collect())
    }

    pub async fn get_biodata(&self, id: Uuid) -> Result<Option<Document>> {
        self.find_by_id(Collection::Biodatas, id).await
    }

    pub async fn get_biodata_by_user_id(&self, user_id: &str) -> Result<Option<Document>> {
        self.find_one_by_field(Collection::Biodatas, USER_ID_FIELD, user_id)
            .await
    }

    pub async fn get_biodata_by_number(&self, biodata_id: i64) -> Result<Option<Document>> {
        let sql = format!(
            "SELECT {} FROM biodatas WHERE biodata_id = $1",
            DOCUMENT_FIELDS
        );
        let row = sqlx::query(&sql)
            .bind(biodata_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_row_to_document))
    }

    /// Creates the biodata for `user_id`, or merges `fields` into the existing
    /// one. A new biodata is stamped with the next sequential `biodataId`.
    ///
    /// Runs in a transaction: merge by `userId`; if nothing matched, take the
    /// next number and insert. Losing an insert race to a concurrent request
    /// for the same user rolls back (returning the number) and retries as a
    /// merge.
    pub async fn upsert_biodata(&self, user_id: &str, fields: Fields) -> Result<BiodataWriteOutcome> {
        let merge = merge_statement(Collection::Biodatas, "doc->>'userId' = $1");

        for attempt in 0..2 {
            let mut tx = self.pool.begin().await?;

            let row = sqlx::query(&merge)
                .bind(user_id)
                .bind(Value::Object(fields.clone()))
                .fetch_one(&mut *tx)
                .await?;
            let update = map_row_to_update_result(&row);
            if update.matched_count > 0 {
                tx.commit().await?;
                return Ok(BiodataWriteOutcome::Updated(update));
            }

            let biodata_id = next_biodata_id(&mut tx).await?;
            let mut doc = fields.clone();
            doc.insert(BIODATA_ID_FIELD.to_string(), Value::from(biodata_id));

            let inserted: Option<Uuid> = sqlx::query_scalar(
                "INSERT INTO biodatas (doc, biodata_id) VALUES ($1, $2) ON CONFLICT DO NOTHING RETURNING id",
            )
            .bind(Value::Object(doc))
            .bind(biodata_id)
            .fetch_optional(&mut *tx)
            .await?;

            match inserted {
                Some(id) => {
                    tx.commit().await?;
                    info!("Created biodata {} for user {}", biodata_id, user_id);
                    return Ok(BiodataWriteOutcome::Inserted(
                        InsertOneResult::with_biodata_id(id, biodata_id),
                    ));
                }
                None => {
                    tx.rollback().await?;
                    warn!(
                        "Biodata for user {} was created concurrently (attempt {}), merging instead",
                        user_id,
                        attempt + 1
                    );
                }
            }
        }

        Err(anyhow!(
            "biodata for user {} could not be created or merged",
            user_id
        ))
    }
}
