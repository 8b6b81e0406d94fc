use thiserror::Error;

use crate::db_types::{DashboardStats, NewOrder, Order, OrderView, Pagination, Platform};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

/// The `OrderManagement` trait defines the behaviour for storing and querying canonical orders.
///
/// Orders are only ever written through [`OrderManagement::upsert_order`], keyed on
/// `(platform, external_order_id)`. They are never deleted.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Inserts the order, or updates the existing order with the same platform and external id.
    ///
    /// The delay tracking fields are recomputed from the dispatch deadline and the current time.
    async fn upsert_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderApiError>;

    async fn fetch_order_by_external_id(
        &self,
        platform: Platform,
        external_order_id: &str,
    ) -> Result<Option<Order>, OrderApiError>;

    /// All orders, newest first.
    async fn fetch_orders(&self, page: Pagination) -> Result<Vec<Order>, OrderApiError>;

    /// The contents of one of the predefined order views.
    async fn fetch_order_view(&self, view: OrderView) -> Result<Vec<Order>, OrderApiError>;

    /// Delivered orders, most recently updated first.
    async fn fetch_delivered_orders(&self, limit: u32) -> Result<Vec<Order>, OrderApiError>;

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, OrderApiError>;
}
