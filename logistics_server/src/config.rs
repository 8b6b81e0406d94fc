use std::env;

use log::*;
use logistics_common::{parse_boolean_flag, parse_env_number};
use marketplace_tools::{FalabellaConfig, MercadoLibreConfig};

const DEFAULT_LOGI_HOST: &str = "127.0.0.1";
const DEFAULT_LOGI_PORT: u16 = 8370;
pub const DEFAULT_APP_NAME: &str = "Unified Logistics API";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, pending database migrations are applied before the server starts listening.
    pub run_migrations: bool,
    /// The service name reported by the root endpoint.
    pub app_name: String,
    /// Browser origins allowed to call the API. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub falabella: FalabellaConfig,
    pub mercadolibre: MercadoLibreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LOGI_HOST.to_string(),
            port: DEFAULT_LOGI_PORT,
            database_url: String::default(),
            run_migrations: true,
            app_name: DEFAULT_APP_NAME.to_string(),
            cors_origins: Vec::new(),
            falabella: FalabellaConfig::default(),
            mercadolibre: MercadoLibreConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("LOGI_HOST").ok().unwrap_or_else(|| DEFAULT_LOGI_HOST.into());
        let port = parse_env_number::<u16>("LOGI_PORT", env::var("LOGI_PORT").ok())
            .unwrap_or_else(|e| {
                error!("🪛️ {e} Using the default, {DEFAULT_LOGI_PORT}, instead.");
                None
            })
            .unwrap_or(DEFAULT_LOGI_PORT);
        let database_url = logistics_engine::db_url();
        let run_migrations = parse_boolean_flag(env::var("LOGI_RUN_MIGRATIONS").ok(), true);
        if !run_migrations {
            info!("🪛️ LOGI_RUN_MIGRATIONS is off. The database schema must already be up to date.");
        }
        let app_name = env::var("LOGI_APP_NAME").ok().unwrap_or_else(|| DEFAULT_APP_NAME.into());
        let cors_origins = parse_cors_origins(env::var("LOGI_CORS_ORIGINS").ok());
        if cors_origins.is_empty() {
            info!("🪛️ CORS: requests from any origin are allowed.");
        } else {
            info!("🪛️ CORS: allowed origins are {}", cors_origins.join(", "));
        }
        let falabella = FalabellaConfig::new_from_env_or_default();
        let mercadolibre = MercadoLibreConfig::new_from_env_or_default();
        Self { host, port, database_url, run_migrations, app_name, cors_origins, falabella, mercadolibre }
    }
}

/// Parses a comma-separated origin list. Unset, blank or `*` allows any origin.
///
/// Entries that are not `http(s)://` origins are ignored, since they could never match a browser's `Origin` header.
fn parse_cors_origins(value: Option<String>) -> Vec<String> {
    let value = value.unwrap_or_default();
    let origins = value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect::<Vec<&str>>();
    if origins.contains(&"*") {
        return Vec::new();
    }
    origins
        .into_iter()
        .filter(|origin| {
            let valid = origin.starts_with("http://") || origin.starts_with("https://");
            if !valid {
                warn!("🪛️ Ignoring invalid CORS origin in LOGI_CORS_ORIGINS: {origin}");
            }
            valid
        })
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}
