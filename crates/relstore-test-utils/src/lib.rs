//! In-memory database bootstrap for tests, grounded in
//! `rustok-test-utils::db::setup_test_db_with_migrations`.

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::sync::Mutex;

static DB_LOCK: tokio::sync::OnceCell<Arc<Mutex<()>>> = tokio::sync::OnceCell::const_new();

/// Boots a fresh in-memory SQLite connection and runs `M`'s migrations.
///
/// The lock serializes migration runs across concurrently executing tests
/// in the same process; each call still gets its own isolated in-memory
/// database.
pub async fn setup_test_db<M>() -> DatabaseConnection
where
    M: MigratorTrait,
{
    let lock = DB_LOCK
        .get_or_init(|| async { Arc::new(Mutex::new(())) })
        .await;
    let _guard = lock.lock().await;

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("failed to connect to in-memory test database");

    M::up(&db, None)
        .await
        .expect("failed to run migrations against test database");

    db
}
