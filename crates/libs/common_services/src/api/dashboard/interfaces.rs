use serde::Serialize;
use utoipa::ToSchema;

/// Record counts shown on the back-office landing page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub enquiries: i64,
    pub photos: i64,
    pub videos: i64,
    pub products: i64,
}
