use chrono::{Days, Duration};
use futures::{stream, StreamExt};
use log::*;
use logistics_common::join_non_empty;
use logistics_engine::{
    db_types::{OrderStatusType, Platform, ShippingType},
    helpers::{map_status, parse_date},
};
use marketplace_tools::{
    meli_shipment_id,
    value_to_string,
    MarketplaceApiError,
    MeliEnrichedOrder,
    MeliOrderSearch,
    MercadoLibreApi,
    MercadoLibreConfig,
};
use serde_json::Value;

use super::{FetchOptions, OrderConversionError, PlatformIntegration, StandardOrder};

const FLEX_DISPATCH_HOURS: i64 = 24;
const SHIPPING_CENTER_DISPATCH_DAYS: u64 = 2;
/// Shipment status assumed when the shipment detail is unavailable.
const DEFAULT_SHIPMENT_STATUS: &str = "pending";
/// Shipment lookups in flight at once while enriching a page of orders.
const SHIPMENT_LOOKUP_CONCURRENCY: usize = 4;

#[derive(Clone)]
pub struct MercadoLibreIntegration {
    api: MercadoLibreApi,
}

impl MercadoLibreIntegration {
    pub fn new(config: MercadoLibreConfig) -> Result<Self, MarketplaceApiError> {
        let api = MercadoLibreApi::new(config)?;
        Ok(Self { api })
    }

    /// Attaches the shipment detail to the order. A failed shipment lookup only costs this order its shipment data.
    async fn enrich(&self, order: Value) -> MeliEnrichedOrder {
        let shipment = match meli_shipment_id(&order) {
            Some(id) => match self.api.fetch_shipment(&id).await {
                Ok(shipment) => Some(shipment),
                Err(e) => {
                    warn!("🛒️ Could not fetch MercadoLibre shipment {id}. Continuing without it. {e}");
                    None
                },
            },
            None => None,
        };
        MeliEnrichedOrder::new(order, shipment)
    }
}

impl PlatformIntegration for MercadoLibreIntegration {
    type RawOrder = MeliEnrichedOrder;

    fn platform(&self) -> Platform {
        Platform::MercadoLibre
    }

    async fn fetch_orders(&self, options: &FetchOptions) -> Vec<MeliEnrichedOrder> {
        let search = MeliOrderSearch { limit: options.limit, offset: options.offset, only_pending: options.only_pending };
        let orders = match self.api.search_orders(&search).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("🛒️ Error fetching MercadoLibre orders. Treating this as an empty order list. {e}");
                return Vec::new();
            },
        };
        let enriched = stream::iter(orders)
            .map(|o| self.enrich(o))
            .buffered(SHIPMENT_LOOKUP_CONCURRENCY)
            .collect::<Vec<MeliEnrichedOrder>>()
            .await;
        info!("🛒️ Fetched {} orders from MercadoLibre", enriched.len());
        enriched
    }

    fn map_to_standard_order(&self, raw: MeliEnrichedOrder) -> Result<StandardOrder, OrderConversionError> {
        standard_order_from_mercadolibre(raw)
    }
}

pub fn standard_order_from_mercadolibre(raw: MeliEnrichedOrder) -> Result<StandardOrder, OrderConversionError> {
    let raw_data = raw.raw_data();
    let order = raw.decode_order().map_err(|e| {
        let id = raw.order.get("id").and_then(value_to_string).unwrap_or_else(|| "without id".into());
        OrderConversionError::format_error(Platform::MercadoLibre, format!("Order {id}. {e}"))
    })?;
    let shipment = raw.shipment;
    let external_order_id = order.external_id().ok_or(OrderConversionError::MissingOrderId(Platform::MercadoLibre))?;
    trace!("🛒️ Mapping MercadoLibre order {external_order_id}");
    let logistic_type = shipment.as_ref().map(|s| s.logistic_type()).unwrap_or_default();
    let shipping_type =
        if logistic_type.contains("flex") { ShippingType::MeliFlex } else { ShippingType::MeliCentroEnvios };
    let substatus = shipment.as_ref().and_then(|s| s.substatus.as_deref());
    let current_status = if substatus == Some("ready_to_print") {
        OrderStatusType::EtiquetaImpresa
    } else {
        let status = shipment.as_ref().and_then(|s| s.status.as_deref()).unwrap_or(DEFAULT_SHIPMENT_STATUS);
        map_status(Platform::MercadoLibre, status)
    };
    let created_at = parse_date(order.date_created.as_deref());
    let limite_despacho = parse_date(shipment.as_ref().and_then(|s| s.schedule_limit())).or_else(|| {
        created_at.and_then(|c| match shipping_type {
            ShippingType::MeliFlex => c.checked_add_signed(Duration::hours(FLEX_DISPATCH_HOURS)),
            _ => c.checked_add_days(Days::new(SHIPPING_CENTER_DISPATCH_DAYS)),
        })
    });
    let promised_delivery = parse_date(shipment.as_ref().and_then(|s| s.estimated_delivery()));
    let address = shipment.as_ref().and_then(|s| s.shipping_address());
    let street_name = address.and_then(|a| value_to_string(&a.street_name));
    let street_number = address.and_then(|a| value_to_string(&a.street_number));
    let zip_code = address.and_then(|a| value_to_string(&a.zip_code));
    let shipping_address =
        Some(join_non_empty([street_name.as_deref(), street_number.as_deref(), zip_code.as_deref()]))
            .filter(|s| !s.is_empty());
    let customer_name = Some(order.customer_name()).filter(|s| !s.is_empty());
    #[allow(clippy::cast_possible_wrap)]
    let items_count = order.order_items.len() as i64;
    Ok(StandardOrder {
        platform: Platform::MercadoLibre,
        order_number: external_order_id.clone(),
        external_order_id,
        shipping_type,
        current_status,
        customer_name,
        customer_phone: order.customer_phone(),
        customer_email: order.customer_email(),
        total_amount: Some(order.total_amount.unwrap_or_default()),
        items_count,
        shipping_address,
        shipping_city: address.and_then(|a| a.city_name()),
        shipping_region: address.and_then(|a| a.state_name()),
        limite_despacho,
        promised_delivery,
        created_at,
        raw_data: Some(raw_data),
    })
}
