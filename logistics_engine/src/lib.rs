//! Logistics Engine
//!
//! The logistics engine holds the canonical order model that every marketplace integration maps onto, and the
//! machinery to store and query it. It knows nothing about HTTP or about any particular marketplace API.
//!
//! The library is divided into the following sections:
//! 1. The canonical data types ([`mod@db_types`]). Orders, tickets and comments, and the string enums that
//!    describe platforms, shipping types and statuses.
//! 2. Pure helpers ([`mod@helpers`]): deadline arithmetic and the marketplace status mapper.
//! 3. Storage traits ([`mod@traits`]) and the SQLite backend that implements them. You should never need to
//!    access the database directly. Aggregations such as "orders at risk" are defined as views in the migrations.
//! 4. The public engine API ([`OrderApi`], [`TicketApi`], [`CommentApi`]). Each API is generic over a backend
//!    implementing the corresponding trait.
mod db;

pub mod db_types;
mod engine_api;
pub mod helpers;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{db_url, SqliteDatabase, SqliteDatabaseError};
pub use engine_api::{comment_api::CommentApi, order_api::OrderApi, ticket_api::TicketApi};
pub use traits::{
    CommentApiError,
    CommentManagement,
    OrderApiError,
    OrderManagement,
    TicketApiError,
    TicketManagement,
};
