use chrono::Days;
use log::*;
use logistics_common::join_non_empty;
use logistics_engine::{
    db_types::{Platform, ShippingType},
    helpers::{map_status, parse_date},
};
use marketplace_tools::{
    value_to_string,
    FalabellaApi,
    FalabellaConfig,
    FalabellaOrder,
    FalabellaOrderQuery,
    MarketplaceApiError,
};
use serde_json::Value;

use super::{FetchOptions, OrderConversionError, PlatformIntegration, StandardOrder};

/// Days added to the creation time when Falabella does not promise a shipping time.
const DEFAULT_SHIPPING_DAYS: u64 = 2;

#[derive(Clone)]
pub struct FalabellaIntegration {
    api: FalabellaApi,
}

impl FalabellaIntegration {
    pub fn new(config: FalabellaConfig) -> Result<Self, MarketplaceApiError> {
        let api = FalabellaApi::new(config)?;
        Ok(Self { api })
    }
}

impl PlatformIntegration for FalabellaIntegration {
    type RawOrder = Value;

    fn platform(&self) -> Platform {
        Platform::Falabella
    }

    async fn fetch_orders(&self, options: &FetchOptions) -> Vec<Value> {
        let query = FalabellaOrderQuery {
            created_after: options.created_after,
            limit: options.limit,
            offset: options.offset,
            only_pending: options.only_pending,
        };
        match self.api.fetch_orders(&query).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("🛒️ Error fetching Falabella orders. Treating this as an empty order list. {e}");
                Vec::new()
            },
        }
    }

    fn map_to_standard_order(&self, raw: Value) -> Result<StandardOrder, OrderConversionError> {
        let order_id = raw.get("OrderId").and_then(value_to_string).unwrap_or_else(|| "without id".into());
        let order = FalabellaOrder::from_value(raw)
            .map_err(|e| OrderConversionError::format_error(Platform::Falabella, format!("Order {order_id}. {e}")))?;
        standard_order_from_falabella(order)
    }
}

pub fn standard_order_from_falabella(order: FalabellaOrder) -> Result<StandardOrder, OrderConversionError> {
    trace!("🛒️ Mapping Falabella order {:?}", order.order_id);
    let external_order_id = order.external_id().ok_or(OrderConversionError::MissingOrderId(Platform::Falabella))?;
    let order_number = order.order_number().unwrap_or_else(|| external_order_id.clone());
    let shipping_type = match order.delivery_info.as_deref() {
        Some(info) if info.to_lowercase().contains("directo") => ShippingType::FalabellaDirecto,
        _ => ShippingType::FalabellaNormal,
    };
    let current_status = map_status(Platform::Falabella, &order.raw_status());
    let created_at = parse_date(order.created_at.as_deref());
    let deadline = parse_date(order.promised_shipping_times.as_deref())
        .or_else(|| created_at.and_then(|c| c.checked_add_days(Days::new(DEFAULT_SHIPPING_DAYS))));
    let total_amount = parse_price(&order.price)?;
    let items_count = parse_items_count(&order.items_count)?;
    let customer_name = Some(order.customer_name()).filter(|s| !s.is_empty());
    let address = order.address_shipping.as_ref();
    let post_code = address.and_then(|a| value_to_string(&a.post_code));
    let shipping_address = Some(join_non_empty([
        address.and_then(|a| a.address1.as_deref()),
        address.and_then(|a| a.city.as_deref()),
        post_code.as_deref(),
    ]))
    .filter(|s| !s.is_empty());
    let shipping_city = address.and_then(|a| a.city.clone());
    let customer_phone = address.and_then(|a| value_to_string(&a.phone));
    let raw_data = serde_json::to_value(&order).map_err(|e| OrderConversionError::format_error(Platform::Falabella, e))?;
    Ok(StandardOrder {
        platform: Platform::Falabella,
        external_order_id,
        order_number,
        shipping_type,
        current_status,
        customer_name,
        customer_phone,
        customer_email: None,
        total_amount: Some(total_amount),
        items_count,
        shipping_address,
        shipping_city,
        shipping_region: None,
        limite_despacho: deadline,
        promised_delivery: deadline,
        created_at,
        raw_data: Some(raw_data),
    })
}

/// `Price` arrives as a number or a numeric string. Missing means zero.
fn parse_price(value: &Value) -> Result<f64, OrderConversionError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => {
            n.as_f64().ok_or_else(|| OrderConversionError::format_error(Platform::Falabella, format!("Price {n}")))
        },
        Value::String(s) => s.trim().parse::<f64>().map_err(|e| {
            OrderConversionError::format_error(Platform::Falabella, format!("Price '{s}' is not a number. {e}"))
        }),
        other => Err(OrderConversionError::format_error(Platform::Falabella, format!("Price {other} is not a number"))),
    }
}

/// `ItemsCount` arrives as an integer or an integer string. Missing means one.
fn parse_items_count(value: &Value) -> Result<i64, OrderConversionError> {
    match value {
        Value::Null => Ok(1),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| OrderConversionError::format_error(Platform::Falabella, format!("ItemsCount {n}"))),
        Value::String(s) => s.trim().parse::<i64>().map_err(|e| {
            OrderConversionError::format_error(Platform::Falabella, format!("ItemsCount '{s}' is not an integer. {e}"))
        }),
        other => Err(OrderConversionError::format_error(
            Platform::Falabella,
            format!("ItemsCount {other} is not an integer"),
        )),
    }
}
