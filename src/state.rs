use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::students::memory::MemoryStudentRepo;
use crate::students::repo::{PgStudentRepo, StudentRepo};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn StudentRepo>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self {
            repo: Arc::new(PgStudentRepo::new(db)),
            config,
        })
    }

    /// State backed by the in-memory store, for tests.
    pub fn in_memory() -> Self {
        Self {
            repo: Arc::new(MemoryStudentRepo::new()),
            config: Arc::new(AppConfig {
                database_url: "postgres://localhost/unused".into(),
                host: "127.0.0.1".into(),
                port: 0,
            }),
        }
    }
}
