use actix_web::{
    body::MessageBody,
    http::StatusCode,
    middleware::NormalizePath,
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use logistics_engine::{
    db_types::{NewOrder, NewTicket, Order, Platform, ShippingType, Ticket, TicketStatus},
    helpers::DelayState,
};
use serde::Serialize;
use serde_json::Value;

pub async fn get_request<F>(path: &str, configure: F) -> Result<(StatusCode, String), String>
where F: FnOnce(&mut ServiceConfig) {
    call(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<T, F>(path: &str, body: &T, configure: F) -> Result<(StatusCode, String), String>
where
    T: Serialize,
    F: FnOnce(&mut ServiceConfig),
{
    call(TestRequest::post().uri(path).set_json(body), configure).await
}

pub async fn patch_request<T, F>(path: &str, body: &T, configure: F) -> Result<(StatusCode, String), String>
where
    T: Serialize,
    F: FnOnce(&mut ServiceConfig),
{
    call(TestRequest::patch().uri(path).set_json(body), configure).await
}

pub async fn call<F>(req: TestRequest, configure: F) -> Result<(StatusCode, String), String>
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().wrap(NormalizePath::trim()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).expect("Response was not JSON")
}

pub fn timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

/// What the database would hand back after storing `order` as row `id`. The raw payload is not echoed back.
pub fn order_from_new(id: i64, order: NewOrder) -> Order {
    let now = timestamp(10, 12);
    let delay = DelayState::assess(&order.limite_despacho, &now);
    Order {
        id,
        platform: order.platform,
        external_order_id: order.external_order_id,
        order_number: order.order_number,
        shipping_type: order.shipping_type,
        current_status: order.current_status,
        customer_name: order.customer_name,
        customer_phone: order.customer_phone,
        customer_email: order.customer_email,
        total_amount: order.total_amount,
        items_count: order.items_count,
        shipping_address: order.shipping_address,
        shipping_city: order.shipping_city,
        shipping_region: order.shipping_region,
        limite_despacho: order.limite_despacho,
        promised_delivery: order.promised_delivery,
        is_delayed: delay.is_delayed,
        delay_detected_at: delay.is_delayed.then_some(now),
        delay_resolved_at: None,
        hours_delayed: delay.hours_delayed,
        raw_data: None,
        created_at: order.created_at.unwrap_or(now),
        updated_at: now,
    }
}

pub fn sample_order(id: i64) -> Order {
    let order = NewOrder::new(Platform::Falabella, format!("F-{id}"), ShippingType::FalabellaNormal, timestamp(11, 18))
        .with_created_at(timestamp(9, 8));
    order_from_new(id, order)
}

pub fn ticket_from_new(id: i64, ticket: NewTicket) -> Ticket {
    let now = timestamp(10, 12);
    Ticket {
        id,
        order_id: ticket.order_id,
        title: ticket.title,
        description: ticket.description,
        status: TicketStatus::Open,
        priority: ticket.priority,
        category: ticket.category,
        created_by: ticket.created_by,
        assigned_to: None,
        resolution: None,
        resolved_at: None,
        created_at: now,
        updated_at: now,
    }
}
