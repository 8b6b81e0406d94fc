//! Marketplace integrations.
//!
//! Each marketplace has an integration that fetches raw orders through `marketplace_tools` and maps them onto the
//! canonical order model. The two halves are kept apart so that the mapping can be tested without a network:
//! * [`PlatformIntegration::fetch_orders`] talks to the marketplace. It never fails. Any upstream error is logged
//!   and reported as "no orders", so that a marketplace outage cannot take the sync of the other marketplace down
//!   with it.
//! * [`PlatformIntegration::map_to_standard_order`] is a pure transform from the raw record to a [`StandardOrder`].
mod falabella;
mod mercadolibre;

use chrono::{DateTime, Utc};
pub use falabella::FalabellaIntegration;
use log::*;
use logistics_engine::db_types::{NewOrder, OrderStatusType, Platform, ShippingType};
pub use mercadolibre::MercadoLibreIntegration;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum OrderConversionError {
    #[error("The {platform} order contained invalid data. {reason}")]
    FormatError { platform: Platform, reason: String },
    #[error("The {0} order does not have an order id")]
    MissingOrderId(Platform),
    #[error("No dispatch deadline could be determined for {platform} order {external_order_id}")]
    MissingDeadline { platform: Platform, external_order_id: String },
}

impl OrderConversionError {
    pub fn format_error<S: ToString>(platform: Platform, reason: S) -> Self {
        Self::FormatError { platform, reason: reason.to_string() }
    }
}

/// Options for a single fetch from a marketplace.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Only fetch orders that still have to be dispatched.
    pub only_pending: bool,
    pub limit: u32,
    pub offset: u32,
    /// Only fetch orders created after this time. Not every marketplace supports this.
    pub created_after: Option<DateTime<Utc>>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { only_pending: true, limit: 50, offset: 0, created_after: None }
    }
}

impl FetchOptions {
    pub fn new(only_pending: bool, limit: u32) -> Self {
        Self { only_pending, limit, ..Default::default() }
    }

    pub fn with_created_after(mut self, created_after: DateTime<Utc>) -> Self {
        self.created_after = Some(created_after);
        self
    }
}

/// A marketplace order mapped onto the canonical fields.
///
/// This differs from [`NewOrder`] only in that the dispatch deadline may be unknown. Orders without a deadline
/// cannot be stored.
#[derive(Debug, Clone)]
pub struct StandardOrder {
    pub platform: Platform,
    pub external_order_id: String,
    pub order_number: String,
    pub shipping_type: ShippingType,
    pub current_status: OrderStatusType,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: Option<f64>,
    pub items_count: i64,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_region: Option<String>,
    pub limite_despacho: Option<DateTime<Utc>>,
    pub promised_delivery: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub raw_data: Option<Value>,
}

impl TryFrom<StandardOrder> for NewOrder {
    type Error = OrderConversionError;

    fn try_from(value: StandardOrder) -> Result<Self, Self::Error> {
        if value.shipping_type.platform() != value.platform {
            return Err(OrderConversionError::format_error(
                value.platform,
                format!("Order {} has shipping type {}", value.external_order_id, value.shipping_type),
            ));
        }
        let limite_despacho = value.limite_despacho.ok_or_else(|| OrderConversionError::MissingDeadline {
            platform: value.platform,
            external_order_id: value.external_order_id.clone(),
        })?;
        Ok(NewOrder {
            platform: value.platform,
            external_order_id: value.external_order_id,
            order_number: value.order_number,
            shipping_type: value.shipping_type,
            current_status: value.current_status,
            customer_name: value.customer_name,
            customer_phone: value.customer_phone,
            customer_email: value.customer_email,
            total_amount: value.total_amount,
            items_count: value.items_count,
            shipping_address: value.shipping_address,
            shipping_city: value.shipping_city,
            shipping_region: value.shipping_region,
            limite_despacho,
            promised_delivery: value.promised_delivery,
            created_at: value.created_at,
            raw_data: value.raw_data,
        })
    }
}

#[allow(async_fn_in_trait)]
pub trait PlatformIntegration {
    /// The order record as the marketplace API returns it.
    type RawOrder;

    fn platform(&self) -> Platform;

    /// Fetches raw orders from the marketplace. Upstream failures are logged and give an empty list.
    async fn fetch_orders(&self, options: &FetchOptions) -> Vec<Self::RawOrder>;

    fn map_to_standard_order(&self, raw: Self::RawOrder) -> Result<StandardOrder, OrderConversionError>;

    /// Fetches orders and maps every one of them. A single order that cannot be mapped fails the whole call.
    async fn get_orders_standardized(&self, options: &FetchOptions) -> Result<Vec<StandardOrder>, OrderConversionError> {
        let raw_orders = self.fetch_orders(options).await;
        let orders =
            raw_orders.into_iter().map(|raw| self.map_to_standard_order(raw)).collect::<Result<Vec<_>, _>>()?;
        debug!("🛒️ Mapped {} {} orders", orders.len(), self.platform());
        Ok(orders)
    }
}
