use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use log::*;
use reqwest::{header::HeaderMap, Method, Url};
use serde_json::Value;
use sha2::Sha256;

use crate::{
    config::FalabellaConfig,
    falabella_order::extract_orders,
    MarketplaceApiError,
    RestClient,
};

const ORDERS_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for a `GetOrders` call.
#[derive(Debug, Clone)]
pub struct FalabellaOrderQuery {
    pub created_after: Option<DateTime<Utc>>,
    pub limit: u32,
    pub offset: u32,
    /// Restrict the result to orders that are ready to ship.
    pub only_pending: bool,
}

impl Default for FalabellaOrderQuery {
    fn default() -> Self {
        Self { created_after: None, limit: 100, offset: 0, only_pending: true }
    }
}

#[derive(Clone)]
pub struct FalabellaApi {
    config: FalabellaConfig,
    client: RestClient,
}

impl FalabellaApi {
    pub fn new(config: FalabellaConfig) -> Result<Self, MarketplaceApiError> {
        let client = RestClient::new(&config.base_url, HeaderMap::new())?;
        Ok(Self { config, client })
    }

    /// Fetches one page of orders. The records are returned undecoded; see [`crate::FalabellaOrder::from_value`].
    pub async fn fetch_orders(&self, query: &FalabellaOrderQuery) -> Result<Vec<Value>, MarketplaceApiError> {
        let url = self.signed_orders_url(query, Utc::now())?;
        debug!("Fetching Falabella orders. Limit {}, offset {}", query.limit, query.offset);
        let response = self.client.rest_query::<Value>(Method::GET, url.as_str(), &[], ORDERS_TIMEOUT).await?;
        let orders = extract_orders(response);
        info!("Fetched {} orders from Falabella", orders.len());
        Ok(orders)
    }

    /// Builds the `GetOrders` URL, including the request signature.
    ///
    /// Seller Center signs requests with an HMAC-SHA256 over the URL-encoded, alphabetically sorted parameters,
    /// keyed with the user's API key, hex-encoded.
    pub fn signed_orders_url(
        &self,
        query: &FalabellaOrderQuery,
        timestamp: DateTime<Utc>,
    ) -> Result<Url, MarketplaceApiError> {
        let mut params = vec![
            ("Action", "GetOrders".to_string()),
            ("Format", "JSON".to_string()),
            ("Limit", query.limit.to_string()),
            ("Offset", query.offset.to_string()),
            ("Timestamp", timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)),
            ("UserID", self.config.user_id.clone()),
            ("Version", "1.0".to_string()),
        ];
        if let Some(created_after) = query.created_after {
            params.push(("CreatedAfter", created_after.to_rfc3339_opts(SecondsFormat::Secs, false)));
        }
        if query.only_pending {
            params.push(("Status", "ready_to_ship".to_string()));
        }
        params.sort_by(|a, b| a.0.cmp(b.0));
        let mut url = Url::parse_with_params(&self.client.url("/orders"), &params)
            .map_err(|e| MarketplaceApiError::RestRequestError(e.to_string()))?;
        let signature = sign(self.config.api_key.reveal(), url.query().unwrap_or_default())?;
        url.query_pairs_mut().append_pair("Signature", &signature);
        Ok(url)
    }
}

fn sign(key: &str, message: &str) -> Result<String, MarketplaceApiError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| MarketplaceApiError::RestRequestError(format!("Invalid signing key. {e}")))?;
    mac.update(message.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}
