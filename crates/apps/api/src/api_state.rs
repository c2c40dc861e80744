use app_state::AppSettings;
use axum::extract::FromRef;
use color_eyre::Result;
use common_services::mail::{Mailer, mailer_from_settings};
use common_services::storage::FileStore;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub files: FileStore,
    pub mailer: Arc<dyn Mailer>,
}

impl ApiContext {
    /// Builds the shared state: file store rooted at the media folder, mailer from the mail settings.
    pub fn new(pool: PgPool, settings: AppSettings) -> Result<Self> {
        let mailer = mailer_from_settings(&settings)?;
        Ok(Self {
            pool,
            files: FileStore::new(settings.storage.clone()),
            settings,
            mailer,
        })
    }
}

impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for FileStore {
    fn from_ref(state: &ApiContext) -> Self {
        state.files.clone()
    }
}
