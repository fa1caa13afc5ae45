use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard counters for the admin overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_biodata: i64,
    pub male_biodata: i64,
    pub female_biodata: i64,
    pub premium_requests: i64,
    pub contact_requests: i64,
    /// Sum of all checkout amounts
    pub total_revenue: f64,
}
