//! SQLite storage backend.
//!
//! The free functions in the submodules take a `&mut SqliteConnection` so that callers can compose them inside a
//! transaction. [`SqliteDatabase`] implements the storage traits on top of them.
mod errors;
mod sqlite_impl;

pub mod comments;
pub mod orders;
pub mod tickets;

use std::env;

pub use errors::SqliteDatabaseError;
use log::info;
pub use sqlite_impl::SqliteDatabase;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

const SQLITE_DB_URL: &str = "sqlite://data/logistics.db";

pub fn db_url() -> String {
    let result = env::var("LOGI_DATABASE_URL").unwrap_or_else(|_| {
        info!("🗃️ LOGI_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("🗃️ Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
