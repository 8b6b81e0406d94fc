use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{header::HeaderMap, Client, Method};
use serde::de::DeserializeOwned;

use crate::MarketplaceApiError;

/// A JSON-over-HTTP client bound to a single marketplace base URL.
///
/// Cloning is cheap; all clones share the same connection pool.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    client: Arc<Client>,
}

impl RestClient {
    pub fn new(base_url: &str, headers: HeaderMap) -> Result<Self, MarketplaceApiError> {
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| MarketplaceApiError::Initialization(e.to_string()))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn rest_query<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, MarketplaceApiError> {
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url).timeout(timeout);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| MarketplaceApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MarketplaceApiError::RestResponseError(e.to_string()))?;
            Err(MarketplaceApiError::QueryError { status, message })
        }
    }
}
