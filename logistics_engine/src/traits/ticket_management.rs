use thiserror::Error;

use crate::db_types::{NewTicket, Ticket, TicketUpdate};

#[derive(Debug, Clone, Error)]
pub enum TicketApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Ticket {0} does not exist")]
    TicketNotFound(i64),
    #[error("The ticket update does not contain any changes")]
    EmptyUpdate,
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),
}

impl From<sqlx::Error> for TicketApiError {
    fn from(e: sqlx::Error) -> Self {
        TicketApiError::DatabaseError(e.to_string())
    }
}

/// Behaviour for the lightweight ticketing workflow attached to orders.
#[allow(async_fn_in_trait)]
pub trait TicketManagement {
    /// Stores a new ticket in the `open` state.
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, TicketApiError>;

    /// Applies a partial update. Moving a ticket to `resolved` or `closed` stamps `resolved_at`.
    ///
    /// Returns [`TicketApiError::TicketNotFound`] if there is no ticket with the given id.
    async fn update_ticket(&self, id: i64, update: TicketUpdate) -> Result<Ticket, TicketApiError>;

    /// Tickets for the order, newest first.
    async fn fetch_tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, TicketApiError>;

    /// Open and in-progress tickets, most urgent first.
    async fn fetch_open_tickets(&self) -> Result<Vec<Ticket>, TicketApiError>;
}
