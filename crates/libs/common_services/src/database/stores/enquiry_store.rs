use crate::database::DbError;
use crate::database::enquiry::{Enquiry, NewEnquiry};
use sqlx::{Executor, Postgres};

pub struct EnquiryStore;

impl EnquiryStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        enquiry: &NewEnquiry,
    ) -> Result<Enquiry, DbError> {
        Ok(sqlx::query_as::<_, Enquiry>(
            r"
            INSERT INTO enquiry (name, mobile, email, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(&enquiry.name)
        .bind(&enquiry.mobile)
        .bind(&enquiry.email)
        .bind(&enquiry.subject)
        .bind(&enquiry.message)
        .fetch_one(executor)
        .await?)
    }

    /// Lists enquiries, newest first. `pattern` is an `ILIKE` pattern over every text column.
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        pattern: Option<&str>,
    ) -> Result<Vec<Enquiry>, DbError> {
        Ok(sqlx::query_as::<_, Enquiry>(
            r"
            SELECT *
            FROM enquiry
            WHERE $1::text IS NULL
               OR name ILIKE $1
               OR mobile ILIKE $1
               OR email ILIKE $1
               OR subject ILIKE $1
               OR message ILIKE $1
            ORDER BY id DESC
            ",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?)
    }

    /// Returns whether a row was deleted.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        enquiry_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM enquiry WHERE id = $1")
            .bind(enquiry_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(executor: impl Executor<'_, Database = Postgres>) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enquiry")
            .fetch_one(executor)
            .await?)
    }
}
