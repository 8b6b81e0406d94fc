use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewTicket, Ticket, TicketUpdate},
    traits::{TicketApiError, TicketManagement},
};

/// Follow-up tickets for orders that need human attention.
pub struct TicketApi<B> {
    db: B,
}

impl<B: Debug> Debug for TicketApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TicketApi ({:?})", self.db)
    }
}

impl<B> TicketApi<B>
where B: TicketManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Opens a new ticket. The status of a new ticket is always `open`.
    pub async fn create_ticket(&self, ticket: NewTicket) -> Result<Ticket, TicketApiError> {
        if ticket.title.trim().is_empty() {
            return Err(TicketApiError::InvalidTicket("title cannot be empty".into()));
        }
        let ticket = self.db.insert_ticket(ticket).await?;
        info!("Ticket #{} opened for order {}", ticket.id, ticket.order_id);
        Ok(ticket)
    }

    pub async fn update_ticket(&self, id: i64, update: TicketUpdate) -> Result<Ticket, TicketApiError> {
        if update.is_empty() {
            return Err(TicketApiError::EmptyUpdate);
        }
        let ticket = self.db.update_ticket(id, update).await?;
        debug!("Ticket #{id} updated. Status is now {}", ticket.status);
        Ok(ticket)
    }

    pub async fn tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, TicketApiError> {
        self.db.fetch_tickets_for_order(order_id).await
    }

    pub async fn open_tickets(&self) -> Result<Vec<Ticket>, TicketApiError> {
        self.db.fetch_open_tickets().await
    }
}
