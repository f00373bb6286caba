use std::sync::Arc;

use axum::extract::FromRef;
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};

use crate::config::Config;
use crate::utils::types::Pool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, String> {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| format!("Failed to create db pool: {e}"))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}
