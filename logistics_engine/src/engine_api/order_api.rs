use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{DashboardStats, NewOrder, Order, OrderView, Pagination, Platform},
    traits::{OrderApiError, OrderManagement},
};

/// The maximum number of delivered orders returned by [`OrderApi::delivered_orders`].
pub const DELIVERED_ORDERS_LIMIT: u32 = 100;

pub struct OrderApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi ({:?})", self.db)
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Inserts the order, or refreshes the stored copy if the platform already sent it before.
    pub async fn upsert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        self.db.upsert_order(order).await
    }

    pub async fn order_by_id(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        self.db.fetch_order_by_id(id).await
    }

    pub async fn order_by_external_id(
        &self,
        platform: Platform,
        external_order_id: &str,
    ) -> Result<Option<Order>, OrderApiError> {
        self.db.fetch_order_by_external_id(platform, external_order_id).await
    }

    /// A page of all orders, newest first. The page size must be between 1 and [`Pagination::MAX_LIMIT`].
    pub async fn all_orders(&self, page: Pagination) -> Result<Vec<Order>, OrderApiError> {
        if page.limit == 0 || page.limit > Pagination::MAX_LIMIT {
            return Err(OrderApiError::QueryError(format!(
                "limit must be between 1 and {}, got {}",
                Pagination::MAX_LIMIT,
                page.limit
            )));
        }
        self.db.fetch_orders(page).await
    }

    pub async fn orders_today(&self) -> Result<Vec<Order>, OrderApiError> {
        self.view(OrderView::Today).await
    }

    pub async fn delayed_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        self.view(OrderView::Delayed).await
    }

    pub async fn orders_at_risk(&self) -> Result<Vec<Order>, OrderApiError> {
        self.view(OrderView::AtRisk).await
    }

    pub async fn orders_to_ship(&self) -> Result<Vec<Order>, OrderApiError> {
        self.view(OrderView::ToShip).await
    }

    /// The most recently delivered orders, capped at [`DELIVERED_ORDERS_LIMIT`].
    pub async fn delivered_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        self.db.fetch_delivered_orders(DELIVERED_ORDERS_LIMIT).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, OrderApiError> {
        self.db.fetch_dashboard_stats().await
    }

    async fn view(&self, view: OrderView) -> Result<Vec<Order>, OrderApiError> {
        let orders = self.db.fetch_order_view(view).await?;
        trace!("{} orders in {view}", orders.len());
        Ok(orders)
    }
}
