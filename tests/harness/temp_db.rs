use std::sync::Arc;

use spycats::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool, SqliteStore};
use tempfile::TempDir;

/// Temporary file-backed SQLite database for integration tests.
///
/// The directory (and the database in it) is removed on drop.
pub struct TempDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(format!("spycats-{name}.db"));
        let pool = create_pool(&path.display().to_string(), 8).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store(&self) -> Arc<SqliteStore> {
        Arc::new(SqliteStore::new(self.pool.clone()))
    }
}
