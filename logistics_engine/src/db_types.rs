use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid {kind}: {value}")]
pub struct ConversionError {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `as_str`, `Display` and `FromStr` for a fieldless enum that is stored and transmitted as a string.
macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant),)+
                    s => Err(ConversionError { kind: $kind, value: s.to_string() }),
                }
            }
        }
    };
}

//--------------------------------------       Platform        ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Platform {
    Falabella,
    MercadoLibre,
}

string_enum!(Platform, "platform", { Falabella => "falabella", MercadoLibre => "mercadolibre" });

//--------------------------------------     ShippingType      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ShippingType {
    /// Falabella ships directly from the seller to the customer.
    FalabellaDirecto,
    FalabellaNormal,
    /// Same-day/next-day delivery handled by the seller.
    MeliFlex,
    /// The seller drops the parcel at a MercadoLibre shipping center.
    MeliCentroEnvios,
}

string_enum!(ShippingType, "shipping type", {
    FalabellaDirecto => "falabella_directo",
    FalabellaNormal => "falabella_normal",
    MeliFlex => "meli_flex",
    MeliCentroEnvios => "meli_centro_envios",
});

impl ShippingType {
    pub fn platform(&self) -> Platform {
        match self {
            Self::FalabellaDirecto | Self::FalabellaNormal => Platform::Falabella,
            Self::MeliFlex | Self::MeliCentroEnvios => Platform::MercadoLibre,
        }
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderStatusType {
    /// Waiting to be dispatched.
    #[default]
    ListoDespachar,
    /// The shipping label has been printed but the parcel has not left yet.
    EtiquetaImpresa,
    Enviado,
    Entregado,
    Cancelado,
}

string_enum!(OrderStatusType, "order status", {
    ListoDespachar => "listo_despachar",
    EtiquetaImpresa => "etiqueta_impresa",
    Enviado => "enviado",
    Entregado => "entregado",
    Cancelado => "cancelado",
});

//--------------------------------------     TicketStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

string_enum!(TicketStatus, "ticket status", {
    Open => "open",
    InProgress => "in_progress",
    Resolved => "resolved",
    Closed => "closed",
});

impl TicketStatus {
    /// Resolved and closed tickets carry a resolution timestamp.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

//--------------------------------------    TicketPriority     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

string_enum!(TicketPriority, "ticket priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

//--------------------------------------       NewOrder        ---------------------------------------------------------
/// A canonical order as produced by a marketplace mapper, ready to be upserted.
///
/// Delay tracking fields are not part of `NewOrder`; they are derived from `limite_despacho` every time the order is
/// written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
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
    /// The time by which the order must be dispatched.
    pub limite_despacho: DateTime<Utc>,
    pub promised_delivery: Option<DateTime<Utc>>,
    /// The creation time reported by the marketplace, if any.
    pub created_at: Option<DateTime<Utc>>,
    pub raw_data: Option<Value>,
}

impl NewOrder {
    pub fn new(
        platform: Platform,
        external_order_id: impl Into<String>,
        shipping_type: ShippingType,
        limite_despacho: DateTime<Utc>,
    ) -> Self {
        let external_order_id = external_order_id.into();
        Self {
            platform,
            order_number: external_order_id.clone(),
            external_order_id,
            shipping_type,
            current_status: OrderStatusType::default(),
            customer_name: None,
            customer_phone: None,
            customer_email: None,
            total_amount: None,
            items_count: 1,
            shipping_address: None,
            shipping_city: None,
            shipping_region: None,
            limite_despacho,
            promised_delivery: None,
            created_at: None,
            raw_data: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.current_status = status;
        self
    }

    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = order_number.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

//--------------------------------------         Order         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
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
    pub limite_despacho: DateTime<Utc>,
    pub promised_delivery: Option<DateTime<Utc>>,
    pub is_delayed: bool,
    pub delay_detected_at: Option<DateTime<Utc>>,
    pub delay_resolved_at: Option<DateTime<Utc>>,
    pub hours_delayed: i64,
    pub raw_data: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       OrderView       ---------------------------------------------------------
/// The predefined order aggregations. Each one is backed by a database view of the same name.
///
/// "Pending" below means `listo_despachar` or `etiqueta_impresa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderView {
    /// Pending orders whose dispatch deadline falls on the current (UTC) date.
    Today,
    /// Pending orders past their dispatch deadline.
    Delayed,
    /// Pending orders with less than six hours left before the deadline.
    AtRisk,
    /// All pending orders.
    ToShip,
}

string_enum!(OrderView, "order view", {
    Today => "orders_today",
    Delayed => "orders_delayed",
    AtRisk => "orders_at_risk",
    ToShip => "orders_to_ship",
});

//--------------------------------------      Pagination       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 500;
}

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: Self::DEFAULT_LIMIT, offset: 0 }
    }
}

//--------------------------------------        Ticket         ---------------------------------------------------------
pub const DEFAULT_AUTHOR: &str = "Sistema";

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    pub order_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_author")]
    pub created_by: String,
}

impl NewTicket {
    pub fn new(order_id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            order_id,
            title: title.into(),
            description: description.into(),
            priority: TicketPriority::default(),
            category: None,
            created_by: default_author(),
        }
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A partial ticket update. Fields that are `None` are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl TicketUpdate {
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assigned_to.is_none() && self.resolution.is_none()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub order_id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: Option<String>,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub resolution: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        Comment        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub order_id: i64,
    pub comment: String,
    #[serde(default = "default_author")]
    pub user_name: String,
}

impl NewComment {
    pub fn new(order_id: i64, comment: impl Into<String>) -> Self {
        Self { order_id, comment: comment.into(), user_name: default_author() }
    }

    pub fn with_author(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub order_id: i64,
    pub comment: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    DashboardStats     ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DashboardStats {
    pub orders_today: i64,
    pub orders_delayed: i64,
    pub orders_ready_to_ship: i64,
    pub orders_shipped: i64,
    pub orders_delivered_today: i64,
    pub avg_delay_hours: f64,
}
