use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Corresponds to the `product_category` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryWithCount {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub product_count: i64,
}

/// Corresponds to the `product` table. `catalogue` and `image` are stored file paths.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub catalogue: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// A product with the number of media items attached to it.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithMediaCount {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub catalogue: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub media_count: i64,
}

/// Columns of a product that an update may change. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub catalogue: Option<String>,
    pub image: Option<String>,
}
