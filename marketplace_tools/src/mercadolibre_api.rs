use std::time::Duration;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Method,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::MercadoLibreConfig,
    helpers::null_as_default,
    mercadolibre_objects::MeliShipment,
    MarketplaceApiError,
    RestClient,
};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
const SHIPMENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct MeliOrderSearch {
    pub limit: u32,
    pub offset: u32,
    /// Only return orders whose shipment is `ready_to_ship`.
    pub only_pending: bool,
}

impl Default for MeliOrderSearch {
    fn default() -> Self {
        Self { limit: 50, offset: 0, only_pending: true }
    }
}

#[derive(Clone)]
pub struct MercadoLibreApi {
    config: MercadoLibreConfig,
    client: RestClient,
}

impl MercadoLibreApi {
    pub fn new(config: MercadoLibreConfig) -> Result<Self, MarketplaceApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token.reveal()))
            .map_err(|e| MarketplaceApiError::Initialization(e.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("x-format-new", HeaderValue::from_static("true"));
        let client = RestClient::new(&config.base_url, headers)?;
        Ok(Self { config, client })
    }

    /// Searches the seller's orders, newest first.
    ///
    /// The orders are returned undecoded; see [`crate::MeliEnrichedOrder::decode_order`].
    pub async fn search_orders(&self, search: &MeliOrderSearch) -> Result<Vec<Value>, MarketplaceApiError> {
        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default, deserialize_with = "null_as_default")]
            results: Vec<Value>,
        }
        let mut params = vec![
            ("seller", self.config.user_id.clone()),
            ("offset", search.offset.to_string()),
            ("limit", search.limit.to_string()),
            ("sort", "date_desc".to_string()),
        ];
        if search.only_pending {
            params.push(("shipping.status", "ready_to_ship".to_string()));
        }
        let url = self.client.url("/orders/search");
        debug!("Searching MercadoLibre orders. Limit {}, offset {}", search.limit, search.offset);
        let response = self.client.rest_query::<SearchResponse>(Method::GET, &url, &params, SEARCH_TIMEOUT).await?;
        info!("Fetched {} orders from MercadoLibre", response.results.len());
        Ok(response.results)
    }

    pub async fn fetch_shipment(&self, shipment_id: &str) -> Result<MeliShipment, MarketplaceApiError> {
        let url = self.client.url(&format!("/shipments/{shipment_id}"));
        trace!("Fetching MercadoLibre shipment {shipment_id}");
        self.client.rest_query::<MeliShipment>(Method::GET, &url, &[], SHIPMENT_TIMEOUT).await
    }
}
