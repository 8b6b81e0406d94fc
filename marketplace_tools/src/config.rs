use log::*;
use logistics_common::Secret;

pub const DEFAULT_FALABELLA_BASE_URL: &str = "https://sellercenter-api.falabella.com";
pub const DEFAULT_MELI_BASE_URL: &str = "https://api.mercadolibre.com";

#[derive(Debug, Clone, Default)]
pub struct FalabellaConfig {
    pub base_url: String,
    pub user_id: String,
    pub api_key: Secret<String>,
}

impl FalabellaConfig {
    pub fn new(base_url: &str, user_id: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            api_key: Secret::new(api_key.to_string()),
        }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("LOGI_FALABELLA_BASE_URL").unwrap_or_else(|_| {
            info!("🪛️ LOGI_FALABELLA_BASE_URL not set, using {DEFAULT_FALABELLA_BASE_URL}");
            DEFAULT_FALABELLA_BASE_URL.to_string()
        });
        let user_id = std::env::var("LOGI_FALABELLA_USER_ID").unwrap_or_else(|_| {
            warn!("🪛️ LOGI_FALABELLA_USER_ID not set. Falabella orders cannot be fetched.");
            String::default()
        });
        let api_key = std::env::var("LOGI_FALABELLA_API_KEY").unwrap_or_else(|_| {
            warn!("🪛️ LOGI_FALABELLA_API_KEY not set. Falabella orders cannot be fetched.");
            String::default()
        });
        Self::new(&base_url, &user_id, &api_key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MercadoLibreConfig {
    pub base_url: String,
    pub user_id: String,
    pub access_token: Secret<String>,
}

impl MercadoLibreConfig {
    pub fn new(base_url: &str, user_id: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            access_token: Secret::new(access_token.to_string()),
        }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("LOGI_MELI_BASE_URL").unwrap_or_else(|_| {
            info!("🪛️ LOGI_MELI_BASE_URL not set, using {DEFAULT_MELI_BASE_URL}");
            DEFAULT_MELI_BASE_URL.to_string()
        });
        let user_id = std::env::var("LOGI_MELI_USER_ID").unwrap_or_else(|_| {
            warn!("🪛️ LOGI_MELI_USER_ID not set. MercadoLibre orders cannot be fetched.");
            String::default()
        });
        let access_token = std::env::var("LOGI_MELI_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ LOGI_MELI_ACCESS_TOKEN not set. MercadoLibre orders cannot be fetched.");
            String::default()
        });
        Self::new(&base_url, &user_id, &access_token)
    }
}
