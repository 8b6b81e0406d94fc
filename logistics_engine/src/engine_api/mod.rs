//! # Logistics engine public API
//!
//! The API is modular so that callers only depend on the storage behaviour they actually use.
//!
//! * [`order_api`] upserts canonical orders and exposes the order views and dashboard counters.
//! * [`ticket_api`] manages follow-up tickets attached to orders.
//! * [`comment_api`] manages free-text comments attached to orders.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend trait it needs:
//!
//! ```rust,ignore
//! use logistics_engine::{OrderApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/logistics.db", 5).await?;
//! // SqliteDatabase implements OrderManagement
//! let api = OrderApi::new(db);
//! let late = api.delayed_orders().await?;
//! ```
pub mod comment_api;
pub mod order_api;
pub mod ticket_api;
