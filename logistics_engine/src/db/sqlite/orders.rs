use chrono::{DateTime, Utc};
use log::{debug, trace};
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{DashboardStats, NewOrder, Order, OrderView, Pagination, Platform},
    helpers::DelayState,
    traits::OrderApiError,
};

// Only delay tracking needs care on conflict. `delay_detected_at` is stamped when an order turns delayed and
// `delay_resolved_at` when it stops being delayed. `created_at` is never overwritten.
const UPSERT_ORDER: &str = r#"
    INSERT INTO orders (
        platform,
        external_order_id,
        order_number,
        shipping_type,
        current_status,
        customer_name,
        customer_phone,
        customer_email,
        total_amount,
        items_count,
        shipping_address,
        shipping_city,
        shipping_region,
        limite_despacho,
        promised_delivery,
        is_delayed,
        delay_detected_at,
        hours_delayed,
        raw_data,
        created_at,
        updated_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
    ON CONFLICT (platform, external_order_id) DO UPDATE SET
        order_number = excluded.order_number,
        shipping_type = excluded.shipping_type,
        current_status = excluded.current_status,
        customer_name = excluded.customer_name,
        customer_phone = excluded.customer_phone,
        customer_email = excluded.customer_email,
        total_amount = excluded.total_amount,
        items_count = excluded.items_count,
        shipping_address = excluded.shipping_address,
        shipping_city = excluded.shipping_city,
        shipping_region = excluded.shipping_region,
        limite_despacho = excluded.limite_despacho,
        promised_delivery = excluded.promised_delivery,
        delay_detected_at = CASE
            WHEN excluded.is_delayed AND (NOT orders.is_delayed OR orders.delay_detected_at IS NULL)
                THEN excluded.updated_at
            ELSE orders.delay_detected_at
        END,
        delay_resolved_at = CASE
            WHEN excluded.is_delayed THEN NULL
            WHEN orders.is_delayed THEN excluded.updated_at
            ELSE orders.delay_resolved_at
        END,
        is_delayed = excluded.is_delayed,
        hours_delayed = excluded.hours_delayed,
        raw_data = excluded.raw_data,
        updated_at = excluded.updated_at
    RETURNING *;
"#;

/// Inserts or updates an order, keyed on `(platform, external_order_id)`, as of `now`.
///
/// This is a single statement, so it is atomic on its own. `now` is used for the delay assessment and for the
/// bookkeeping timestamps.
pub async fn upsert_order(
    order: NewOrder,
    now: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let delay = DelayState::assess(&order.limite_despacho, &now);
    let delay_detected_at = delay.is_delayed.then_some(now);
    let created_at = order.created_at.unwrap_or(now);
    trace!("🗃️ Upserting {} order {}. {delay:?}", order.platform, order.external_order_id);
    let record = sqlx::query_as::<_, Order>(UPSERT_ORDER)
        .bind(order.platform)
        .bind(order.external_order_id)
        .bind(order.order_number)
        .bind(order.shipping_type)
        .bind(order.current_status)
        .bind(order.customer_name)
        .bind(order.customer_phone)
        .bind(order.customer_email)
        .bind(order.total_amount)
        .bind(order.items_count)
        .bind(order.shipping_address)
        .bind(order.shipping_city)
        .bind(order.shipping_region)
        .bind(order.limite_despacho)
        .bind(order.promised_delivery)
        .bind(delay.is_delayed)
        .bind(delay_detected_at)
        .bind(delay.hours_delayed)
        .bind(order.raw_data.map(Json))
        .bind(created_at)
        .bind(now)
        .fetch_one(conn)
        .await?;
    debug!("🗃️ Order {} ({}) saved with id {}", record.order_number, record.platform, record.id);
    Ok(record)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderApiError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

pub async fn fetch_order_by_external_id(
    platform: Platform,
    external_order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderApiError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE platform = $1 AND external_order_id = $2")
        .bind(platform)
        .bind(external_order_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Fetches a page of orders, newest first.
pub async fn fetch_orders(page: Pagination, conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderApiError> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2")
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

/// Fetches the contents of an order view, ordered by dispatch deadline (most urgent first).
pub async fn fetch_order_view(view: OrderView, conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderApiError> {
    let sql = format!("SELECT * FROM {} ORDER BY limite_despacho ASC, id ASC", view.as_str());
    trace!("🗃️ Executing query: {sql}");
    let orders = sqlx::query_as(&sql).fetch_all(conn).await?;
    Ok(orders)
}

pub async fn fetch_delivered_orders(limit: u32, conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderApiError> {
    let orders =
        sqlx::query_as("SELECT * FROM orders WHERE current_status = 'entregado' ORDER BY updated_at DESC LIMIT $1")
            .bind(i64::from(limit))
            .fetch_all(conn)
            .await?;
    Ok(orders)
}

/// Reads the single row of the `dashboard_stats` view. An empty result gives all-zero counters.
pub async fn fetch_dashboard_stats(conn: &mut SqliteConnection) -> Result<DashboardStats, OrderApiError> {
    let stats = sqlx::query_as::<_, DashboardStats>("SELECT * FROM dashboard_stats").fetch_optional(conn).await?;
    Ok(stats.unwrap_or_default())
}
