use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::helpers::{null_as_default, value_to_string};

//--------------------------------------   Orders   ---------------------------------------------------------

/// An entry in the `results` list of `/orders/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliOrder {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub buyer: Option<MeliBuyer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_items: Vec<Value>,
    #[serde(default)]
    pub shipping: Option<MeliShippingRef>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliBuyer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<MeliPhone>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliPhone {
    #[serde(default)]
    pub number: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliShippingRef {
    #[serde(default)]
    pub id: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The shipment id of an undecoded order, if it has one.
pub fn meli_shipment_id(order: &Value) -> Option<String> {
    order.get("shipping").and_then(|s| s.get("id")).and_then(value_to_string)
}

impl MeliOrder {
    pub fn external_id(&self) -> Option<String> {
        value_to_string(&self.id)
    }

    pub fn customer_name(&self) -> String {
        let buyer = self.buyer.as_ref();
        let first = buyer.and_then(|b| b.first_name.as_deref()).unwrap_or_default();
        let last = buyer.and_then(|b| b.last_name.as_deref()).unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }

    pub fn customer_phone(&self) -> Option<String> {
        self.buyer.as_ref().and_then(|b| b.phone.as_ref()).and_then(|p| value_to_string(&p.number))
    }

    pub fn customer_email(&self) -> Option<String> {
        self.buyer.as_ref().and_then(|b| b.email.clone())
    }
}

//--------------------------------------   Shipments   ------------------------------------------------------

/// The response of `/shipments/{id}` (new format).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliShipment {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub substatus: Option<String>,
    #[serde(default)]
    pub logistic: Option<MeliLogistic>,
    #[serde(default)]
    pub lead_time: Option<MeliLeadTime>,
    #[serde(default)]
    pub destination: Option<MeliDestination>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliLogistic {
    #[serde(default, rename = "type")]
    pub logistic_type: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliLeadTime {
    #[serde(default)]
    pub estimated_schedule_limit: Option<MeliDateRef>,
    #[serde(default)]
    pub estimated_delivery_time: Option<MeliDateRef>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliDateRef {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliDestination {
    #[serde(default)]
    pub shipping_address: Option<MeliAddress>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeliAddress {
    #[serde(default)]
    pub street_name: Value,
    #[serde(default)]
    pub street_number: Value,
    #[serde(default)]
    pub zip_code: Value,
    /// Either a plain string or an object with a `name` field.
    #[serde(default)]
    pub city: Value,
    #[serde(default)]
    pub state: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl MeliAddress {
    pub fn city_name(&self) -> Option<String> {
        named_value(&self.city)
    }

    pub fn state_name(&self) -> Option<String> {
        named_value(&self.state)
    }
}

fn named_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("name").and_then(value_to_string),
        other => value_to_string(other),
    }
}

impl MeliShipment {
    /// The logistic type, lower-cased. Empty if the shipment does not say.
    pub fn logistic_type(&self) -> String {
        self.logistic.as_ref().and_then(|l| l.logistic_type.as_deref()).unwrap_or_default().to_lowercase()
    }

    pub fn schedule_limit(&self) -> Option<&str> {
        self.lead_time.as_ref().and_then(|l| l.estimated_schedule_limit.as_ref()).and_then(|d| d.date.as_deref())
    }

    pub fn estimated_delivery(&self) -> Option<&str> {
        self.lead_time.as_ref().and_then(|l| l.estimated_delivery_time.as_ref()).and_then(|d| d.date.as_deref())
    }

    pub fn shipping_address(&self) -> Option<&MeliAddress> {
        self.destination.as_ref().and_then(|d| d.shipping_address.as_ref())
    }
}

//--------------------------------------   Enriched orders   ------------------------------------------------

/// An order together with its shipment detail, if the shipment could be fetched.
///
/// The order is kept as it came off the wire. It is decoded with [`MeliEnrichedOrder::decode_order`] when it is
/// mapped, so a malformed order surfaces as an error for that order alone.
#[derive(Debug, Clone, Default)]
pub struct MeliEnrichedOrder {
    pub order: Value,
    pub shipment: Option<MeliShipment>,
}

impl MeliEnrichedOrder {
    pub fn new(order: Value, shipment: Option<MeliShipment>) -> Self {
        Self { order, shipment }
    }

    pub fn decode_order(&self) -> Result<MeliOrder, serde_json::Error> {
        serde_json::from_value(self.order.clone())
    }

    /// The order and shipment payloads, as they will be archived with the canonical order.
    pub fn raw_data(&self) -> Value {
        json!({ "order": self.order, "shipment": self.shipment })
    }
}
