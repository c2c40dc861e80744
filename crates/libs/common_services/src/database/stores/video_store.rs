use crate::database::DbError;
use crate::database::video::Video;
use sqlx::{Executor, Postgres};

pub struct VideoStore;

impl VideoStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        caption: Option<&str>,
        source_url: &str,
        thumbnail: Option<&str>,
    ) -> Result<Video, DbError> {
        Ok(sqlx::query_as::<_, Video>(
            r"
            INSERT INTO video (caption, source_url, thumbnail)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(caption)
        .bind(source_url)
        .bind(thumbnail)
        .fetch_one(executor)
        .await?)
    }

    /// Lists videos, newest first, optionally filtered on caption or link.
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        pattern: Option<&str>,
    ) -> Result<Vec<Video>, DbError> {
        Ok(sqlx::query_as::<_, Video>(
            r"
            SELECT *
            FROM video
            WHERE $1::text IS NULL OR caption ILIKE $1 OR source_url ILIKE $1
            ORDER BY id DESC
            ",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?)
    }

    /// Deletes a video and returns the deleted row, if there was one.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        video_id: i32,
    ) -> Result<Option<Video>, DbError> {
        Ok(
            sqlx::query_as::<_, Video>("DELETE FROM video WHERE id = $1 RETURNING *")
                .bind(video_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn count(executor: impl Executor<'_, Database = Postgres>) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM video")
            .fetch_one(executor)
            .await?)
    }
}
