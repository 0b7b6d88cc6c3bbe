use crate::{config::Config, db::connection::DbPool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self { pool, config }
    }
}

impl From<(DbPool, Config)> for AppState {
    fn from((pool, config): (DbPool, Config)) -> Self {
        Self::new(pool, config)
    }
}
