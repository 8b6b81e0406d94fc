use crate::db_types::{OrderStatusType, Platform};

/// Translates a marketplace status string into the canonical order status.
///
/// Matching is case-insensitive. Falabella spells the cancelled state `canceled` and MercadoLibre spells it
/// `cancelled`; each platform only recognises its own spelling. Anything unrecognised maps to
/// [`OrderStatusType::ListoDespachar`].
pub fn map_status(platform: Platform, raw_status: &str) -> OrderStatusType {
    let status = raw_status.trim().to_lowercase();
    let mapped = match platform {
        Platform::Falabella => falabella_status(&status),
        Platform::MercadoLibre => mercadolibre_status(&status),
    };
    mapped.unwrap_or_default()
}

fn falabella_status(status: &str) -> Option<OrderStatusType> {
    match status {
        "ready_to_ship" => Some(OrderStatusType::ListoDespachar),
        "shipped" => Some(OrderStatusType::Enviado),
        "delivered" => Some(OrderStatusType::Entregado),
        "canceled" => Some(OrderStatusType::Cancelado),
        _ => None,
    }
}

fn mercadolibre_status(status: &str) -> Option<OrderStatusType> {
    match status {
        "ready_to_ship" => Some(OrderStatusType::ListoDespachar),
        "shipped" => Some(OrderStatusType::Enviado),
        "delivered" => Some(OrderStatusType::Entregado),
        "cancelled" => Some(OrderStatusType::Cancelado),
        _ => None,
    }
}
