use std::sync::Arc;

use anyhow::Context;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        db::init_schema(&db)
            .await
            .context("initialize database schema")?;
        Ok(Self {
            db,
            config,
            sessions: SessionStore::new(),
        })
    }
}
