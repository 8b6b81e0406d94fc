use log::*;
use logistics_engine::SqliteDatabase;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub fn random_db_path() -> String {
    let path = std::env::temp_dir().join(format!("logistics_engine_test_{}.db", rand::random::<u64>()));
    format!("sqlite://{}", path.display())
}

/// Creates a fresh, migrated database and returns a connection to it together with its URL.
pub async fn prepare_test_db() -> (String, SqliteDatabase) {
    let _ = env_logger::try_init();
    let url = random_db_path();
    if let Err(e) = Sqlite::drop_database(&url).await {
        trace!("Nothing to drop at {url}: {e}");
    }
    let db = SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    debug!("🚀️ Created test database {url}");
    (url, db)
}

pub async fn remove_test_db(url: &str, mut db: SqliteDatabase) {
    if let Err(e) = db.close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("🚀️ Could not remove test database {url}: {e}");
    }
}
