use app_state::AppSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// Run migrations and get a database connection pool.
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
/// * `sqlx::migrate` can return an error if migrations fail.
pub async fn get_db_pool(settings: &AppSettings) -> color_eyre::Result<Pool<Postgres>> {
    let db_settings = &settings.database;
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connection)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout))
        .test_before_acquire(true)
        .connect(&settings.secrets.database_url)
        .await?;

    sqlx::migrate!("../../../migrations").run(&pool).await?;
    info!("Database migrations are up to date.");
    Ok(pool)
}

/// `ILIKE` pattern matching `term` anywhere, with wildcard characters in the term escaped.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Search pattern for an optional, possibly blank, search term.
#[must_use]
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .filter(|s| !s.trim().is_empty())
        .map(contains_pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(contains_pattern(" pump "), "%pump%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("  ")), None);
        assert_eq!(search_pattern(Some("abc")), Some("%abc%".to_owned()));
    }
}
