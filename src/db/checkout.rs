use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use super::{Collection, Database};
use crate::models::{AdminStats, CheckoutTotal, Fields};

/// `amount` as float8, NULL when the stored value is not a JSON number.
const AMOUNT_EXPR: &str =
    "CASE WHEN jsonb_typeof(doc->'amount') = 'number' THEN (doc->>'amount')::float8 END";

impl Database {
    pub async fn create_checkout(&self, checkout: Fields) -> Result<Uuid> {
        self.insert(Collection::Checkout, checkout).await
    }

    /// Single-group sum of `amount`. No group exists, and so nothing is
    /// returned, when there are no checkout records.
    pub async fn checkout_totals(&self) -> Result<Vec<CheckoutTotal>> {
        let sql = format!(
            "SELECT COALESCE(SUM({}), 0)::float8 AS total, COUNT(*) AS records FROM checkout",
            AMOUNT_EXPR
        );
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        let records: i64 = row.get("records");
        if records == 0 {
            return Ok(Vec::new());
        }

        Ok(vec![CheckoutTotal::new(row.get("total"))])
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let sql = format!(
            r#"
            SELECT
                (SELECT COUNT(*) FROM biodatas) AS total_biodata,
                (SELECT COUNT(*) FROM biodatas WHERE doc->>'biodataType' = 'Male') AS male_biodata,
                (SELECT COUNT(*) FROM biodatas WHERE doc->>'biodataType' = 'Female') AS female_biodata,
                (SELECT COUNT(*) FROM premium) AS premium_requests,
                (SELECT COUNT(*) FROM contact) AS contact_requests,
                (SELECT COALESCE(SUM({}), 0)::float8 FROM checkout) AS total_revenue
            "#,
            AMOUNT_EXPR
        );
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;

        Ok(AdminStats {
            total_biodata: row.get("total_biodata"),
            male_biodata: row.get("male_biodata"),
            female_biodata: row.get("female_biodata"),
            premium_requests: row.get("premium_requests"),
            contact_requests: row.get("contact_requests"),
            total_revenue: row.get("total_revenue"),
        })
    }
}
