use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite, SqlitePool};

use super::{comments, new_pool, orders, tickets, SqliteDatabaseError};
use crate::{
    db_types::{
        Comment,
        DashboardStats,
        NewComment,
        NewOrder,
        NewTicket,
        Order,
        OrderView,
        Pagination,
        Platform,
        Ticket,
        TicketUpdate,
    },
    traits::{
        CommentApiError,
        CommentManagement,
        OrderApiError,
        OrderManagement,
        TicketApiError,
        TicketManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Connects to the database at `url`, creating the database file if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        if !Sqlite::database_exists(url).await? {
            info!("🗃️ Database {url} does not exist. Creating it.");
            Sqlite::create_database(url).await?;
        }
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every start-up.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), SqliteDatabaseError> {
        self.pool.close().await;
        Ok(())
    }
}

impl OrderManagement for SqliteDatabase {
    async fn upsert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::upsert_order(order, Utc::now(), &mut conn).await
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await
    }

    async fn fetch_order_by_external_id(
        &self,
        platform: Platform,
        external_order_id: &str,
    ) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_external_id(platform, external_order_id, &mut conn).await
    }

    async fn fetch_orders(&self, page: Pagination) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders(page, &mut conn).await
    }

    async fn fetch_order_view(&self, view: OrderView) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_view(view, &mut conn).await
    }

    async fn fetch_delivered_orders(&self, limit: u32) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_delivered_orders(limit, &mut conn).await
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_dashboard_stats(&mut conn).await
    }
}

impl TicketManagement for SqliteDatabase {
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, TicketApiError> {
        let mut conn = self.pool.acquire().await?;
        tickets::insert_ticket(ticket, Utc::now(), &mut conn).await
    }

    async fn update_ticket(&self, id: i64, update: TicketUpdate) -> Result<Ticket, TicketApiError> {
        let mut conn = self.pool.acquire().await?;
        tickets::update_ticket(id, update, Utc::now(), &mut conn).await
    }

    async fn fetch_tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, TicketApiError> {
        let mut conn = self.pool.acquire().await?;
        tickets::fetch_tickets_for_order(order_id, &mut conn).await
    }

    async fn fetch_open_tickets(&self) -> Result<Vec<Ticket>, TicketApiError> {
        let mut conn = self.pool.acquire().await?;
        tickets::fetch_open_tickets(&mut conn).await
    }
}

impl CommentManagement for SqliteDatabase {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, CommentApiError> {
        let mut conn = self.pool.acquire().await?;
        comments::insert_comment(comment, Utc::now(), &mut conn).await
    }

    async fn fetch_comments_for_order(&self, order_id: i64) -> Result<Vec<Comment>, CommentApiError> {
        let mut conn = self.pool.acquire().await?;
        comments::fetch_comments_for_order(order_id, &mut conn).await
    }
}
