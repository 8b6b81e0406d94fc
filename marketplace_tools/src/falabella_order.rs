use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::helpers::value_to_string;

/// An order as returned by the Falabella Seller Center `GetOrders` action.
///
/// Only the fields the logistics backend reads are typed. Everything else is kept in `other` so that the full
/// payload can be serialized back out for auditing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FalabellaOrder {
    #[serde(default)]
    pub order_id: Value,
    #[serde(default)]
    pub order_number: Value,
    #[serde(default)]
    pub customer_first_name: Option<String>,
    #[serde(default)]
    pub customer_last_name: Option<String>,
    #[serde(default)]
    pub delivery_info: Option<String>,
    #[serde(default)]
    pub statuses: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub promised_shipping_times: Option<String>,
    #[serde(default)]
    pub address_shipping: Option<FalabellaAddress>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub items_count: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FalabellaAddress {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub post_code: Value,
    #[serde(default)]
    pub phone: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl FalabellaOrder {
    /// Decodes a single record of a `GetOrders` response.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn external_id(&self) -> Option<String> {
        value_to_string(&self.order_id)
    }

    pub fn order_number(&self) -> Option<String> {
        value_to_string(&self.order_number)
    }

    /// The status string to feed to the status mapper.
    ///
    /// `Statuses` is normally a list, in which case the first entry is used. Anything else is used in its
    /// literal string form.
    pub fn raw_status(&self) -> String {
        match &self.statuses {
            Value::Array(list) if !list.is_empty() => match &list[0] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn customer_name(&self) -> String {
        let first = self.customer_first_name.as_deref().unwrap_or_default();
        let last = self.customer_last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

/// Extracts the raw records in `Body.Orders.Order` from a `GetOrders` response.
///
/// The field holds a list when there are several orders and a bare object when there is exactly one.
/// Responses wrapped in a `SuccessResponse` envelope are also accepted. Records are not decoded here, so that a
/// single malformed order cannot take the rest of the page down with it.
pub(crate) fn extract_orders(response: Value) -> Vec<Value> {
    let mut response = response;
    if response.get("Body").is_none() {
        if let Some(inner) = response.get_mut("SuccessResponse") {
            response = inner.take();
        }
    }
    let orders = response.get_mut("Body").and_then(|b| b.get_mut("Orders")).and_then(|o| o.get_mut("Order"));
    match orders.map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(list)) => list,
        Some(v) => vec![v],
    }
}
