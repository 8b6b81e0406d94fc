//! Pulls orders from the marketplaces and upserts them into the order book.
//!
//! A sync runs inside the request that triggers it. Each platform is synced in isolation, so a failure on one
//! marketplace is reported alongside the result of the other rather than aborting the whole run.
use std::time::Instant;

use chrono::{Days, Utc};
use log::*;
use logistics_engine::{
    db_types::{NewOrder, Platform},
    OrderApi,
    OrderManagement,
};

use crate::{
    data_objects::{PlatformSyncResult, SyncResult, SyncType},
    integrations::{
        FalabellaIntegration,
        FetchOptions,
        MercadoLibreIntegration,
        OrderConversionError,
        PlatformIntegration,
    },
};

const FALABELLA_SYNC_LIMIT: u32 = 100;
/// Falabella syncs only look at orders created in this many most recent days.
const FALABELLA_LOOKBACK_DAYS: u64 = 7;
const MELI_SYNC_LIMIT: u32 = 50;

pub struct SyncService<B> {
    orders: OrderApi<B>,
    falabella: FalabellaIntegration,
    mercadolibre: MercadoLibreIntegration,
}

impl<B> SyncService<B>
where B: OrderManagement
{
    pub fn new(orders: OrderApi<B>, falabella: FalabellaIntegration, mercadolibre: MercadoLibreIntegration) -> Self {
        Self { orders, falabella, mercadolibre }
    }

    /// Syncs Falabella, then MercadoLibre.
    pub async fn sync_all_platforms(&self, only_pending: bool) -> SyncResult {
        let start = Instant::now();
        let mut errors = Vec::new();
        let falabella = self.sync_falabella(only_pending).await.map_err(|e| {
            error!("🔄️ Error syncing Falabella. {e}");
            errors.push(format!("Falabella: {e}"));
        });
        let mercadolibre = self.sync_mercadolibre(only_pending).await.map_err(|e| {
            error!("🔄️ Error syncing MercadoLibre. {e}");
            errors.push(format!("MercadoLibre: {e}"));
        });
        let falabella = falabella.ok();
        let mercadolibre = mercadolibre.ok();
        let total_synced: usize = falabella.iter().chain(mercadolibre.iter()).map(|r| r.orders_synced).sum();
        let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        let sync_type = SyncType::from(only_pending);
        info!("🔄️ Sync completed: {total_synced} orders in {execution_time_ms:.0}ms (type: {sync_type:?})");
        SyncResult { falabella, mercadolibre, total_synced, errors, sync_type, execution_time_ms }
    }

    /// Syncs Falabella orders created in the last week.
    pub async fn sync_falabella(&self, only_pending: bool) -> Result<PlatformSyncResult, OrderConversionError> {
        let mut options = FetchOptions::new(only_pending, FALABELLA_SYNC_LIMIT);
        if let Some(since) = Utc::now().checked_sub_days(Days::new(FALABELLA_LOOKBACK_DAYS)) {
            options = options.with_created_after(since);
        }
        self.sync_platform(&self.falabella, &options).await
    }

    pub async fn sync_mercadolibre(&self, only_pending: bool) -> Result<PlatformSyncResult, OrderConversionError> {
        let options = FetchOptions::new(only_pending, MELI_SYNC_LIMIT);
        self.sync_platform(&self.mercadolibre, &options).await
    }

    /// Fetches and maps the platform's orders, then upserts them one by one.
    ///
    /// A mapping failure fails the whole platform. An order that cannot be stored is logged and skipped.
    pub async fn sync_platform<I: PlatformIntegration>(
        &self,
        integration: &I,
        options: &FetchOptions,
    ) -> Result<PlatformSyncResult, OrderConversionError> {
        let platform = integration.platform();
        let orders = integration.get_orders_standardized(options).await?;
        let orders_fetched = orders.len();
        let mut orders_synced = 0;
        for order in orders {
            let external_id = order.external_order_id.clone();
            let result = match NewOrder::try_from(order) {
                Ok(order) => self.orders.upsert_order(order).await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match result {
                Ok(order) => {
                    trace!("🔄️ {platform} order {external_id} stored as #{}", order.id);
                    orders_synced += 1;
                },
                Err(e) => error!("🔄️ Error syncing {platform} order {external_id}. {e}"),
            }
        }
        info!("🔄️ {platform}: {orders_synced} of {orders_fetched} orders synced");
        Ok(PlatformSyncResult { platform, orders_synced, orders_fetched, only_pending: options.only_pending })
    }
}
