use crate::database::DbError;
use crate::database::app_user::{RefreshTokenRecord, User, UserRole, UserWithPassword};
use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

const USER_COLUMNS: &str = "id, created_at, updated_at, email, name, role";

pub struct UserStore;

impl UserStore {
    /// Creates a new user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
        role: UserRole,
    ) -> Result<User, DbError> {
        let sql = format!(
            "INSERT INTO app_user (email, name, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(hashed_password)
            .bind(role)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Fetches a user including the password hash, for credential checks only.
    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS}, password FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn get_user_role(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<UserRole>, DbError> {
        Ok(
            sqlx::query_scalar::<_, UserRole>("SELECT role FROM app_user WHERE id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn any_exists(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM app_user)")
                .fetch_one(executor)
                .await?,
        )
    }
}

pub struct RefreshTokenStore;

impl RefreshTokenStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        selector: &str,
        verifier_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(selector)
        .bind(verifier_hash)
        .bind(expires_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Finds an unexpired token by its selector.
    pub async fn find_valid(
        executor: impl Executor<'_, Database = Postgres>,
        selector: &str,
    ) -> Result<Option<RefreshTokenRecord>, DbError> {
        Ok(sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT user_id, verifier_hash FROM refresh_token
             WHERE selector = $1 AND expires_at > NOW()",
        )
        .bind(selector)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete_by_selector(
        executor: impl Executor<'_, Database = Postgres>,
        selector: &str,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
            .bind(selector)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
