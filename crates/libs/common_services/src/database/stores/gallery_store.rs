use crate::database::DbError;
use crate::database::photo::{Photo, PhotoCategory, PhotoCategoryWithCount, PhotoWithCategory};
use sqlx::{Executor, Postgres};

/// Filters for the admin photo list. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct PhotoFilter {
    pub category_id: Option<i32>,
    pub show_on_home_page: Option<bool>,
    /// `ILIKE` pattern over caption, description and category name.
    pub pattern: Option<String>,
}

pub struct GalleryStore;

impl GalleryStore {
    // --- Categories ---

    pub async fn create_category(
        executor: impl Executor<'_, Database = Postgres>,
        name: &str,
    ) -> Result<PhotoCategory, DbError> {
        Ok(sqlx::query_as::<_, PhotoCategory>(
            "INSERT INTO photo_category (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(executor)
        .await?)
    }

    /// Categories ordered by name, each with its photo count.
    pub async fn list_categories_with_count(
        executor: impl Executor<'_, Database = Postgres>,
        pattern: Option<&str>,
    ) -> Result<Vec<PhotoCategoryWithCount>, DbError> {
        Ok(sqlx::query_as::<_, PhotoCategoryWithCount>(
            r"
            SELECT c.id, c.name, c.created_at, COUNT(p.id) AS photo_count
            FROM photo_category c
            LEFT JOIN photo p ON p.category_id = c.id
            WHERE $1::text IS NULL OR c.name ILIKE $1
            GROUP BY c.id
            ORDER BY c.name, c.id
            ",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?)
    }

    pub async fn find_category(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Option<PhotoCategory>, DbError> {
        Ok(sqlx::query_as::<_, PhotoCategory>(
            "SELECT id, name, created_at FROM photo_category WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes a category. Its photos go with it through the foreign key cascade.
    pub async fn delete_category(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Option<PhotoCategory>, DbError> {
        Ok(sqlx::query_as::<_, PhotoCategory>(
            "DELETE FROM photo_category WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(category_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Image paths of every photo in a category.
    pub async fn list_category_image_paths(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Vec<String>, DbError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT image FROM photo WHERE category_id = $1")
                .bind(category_id)
                .fetch_all(executor)
                .await?,
        )
    }

    // --- Photos ---

    pub async fn create_photo(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
        caption: Option<&str>,
        description: Option<&str>,
        image: &str,
        show_on_home_page: bool,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            INSERT INTO photo (category_id, caption, description, image, show_on_home_page)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(category_id)
        .bind(caption)
        .bind(description)
        .bind(image)
        .bind(show_on_home_page)
        .fetch_one(executor)
        .await?)
    }

    /// Admin photo list, newest first.
    pub async fn list_photos(
        executor: impl Executor<'_, Database = Postgres>,
        filter: &PhotoFilter,
    ) -> Result<Vec<PhotoWithCategory>, DbError> {
        Ok(sqlx::query_as::<_, PhotoWithCategory>(
            r"
            SELECT p.id, p.category_id, c.name AS category_name, p.caption, p.description,
                   p.image, p.show_on_home_page, p.created_at
            FROM photo p
            JOIN photo_category c ON c.id = p.category_id
            WHERE ($1::int IS NULL OR p.category_id = $1)
              AND ($2::bool IS NULL OR p.show_on_home_page = $2)
              AND ($3::text IS NULL
                   OR p.caption ILIKE $3
                   OR p.description ILIKE $3
                   OR c.name ILIKE $3)
            ORDER BY p.id DESC
            ",
        )
        .bind(filter.category_id)
        .bind(filter.show_on_home_page)
        .bind(filter.pattern.as_deref())
        .fetch_all(executor)
        .await?)
    }

    /// Every photo, in insertion order, for the public gallery.
    pub async fn list_all_photos(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>("SELECT * FROM photo ORDER BY id")
            .fetch_all(executor)
            .await?)
    }

    pub async fn list_home_page_photos(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT * FROM photo WHERE show_on_home_page ORDER BY id",
        )
        .fetch_all(executor)
        .await?)
    }

    pub async fn delete_photo(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        Ok(
            sqlx::query_as::<_, Photo>("DELETE FROM photo WHERE id = $1 RETURNING *")
                .bind(photo_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Sets the home page flag on the given photos, returning how many rows changed.
    pub async fn set_home_page_flag(
        executor: impl Executor<'_, Database = Postgres>,
        photo_ids: &[i32],
        show: bool,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE photo SET show_on_home_page = $2 WHERE id = ANY($1)")
            .bind(photo_ids)
            .bind(show)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_photos(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photo")
            .fetch_one(executor)
            .await?)
    }
}
