use chrono::{DateTime, Utc};
use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{NewTicket, Ticket, TicketStatus, TicketUpdate},
    traits::TicketApiError,
};

pub async fn insert_ticket(
    ticket: NewTicket,
    now: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Ticket, TicketApiError> {
    let order_id = ticket.order_id;
    let result = sqlx::query_as::<_, Ticket>(
        r#"
            INSERT INTO tickets (order_id, title, description, status, priority, category, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(ticket.order_id)
    .bind(ticket.title)
    .bind(ticket.description)
    .bind(TicketStatus::Open)
    .bind(ticket.priority)
    .bind(ticket.category)
    .bind(ticket.created_by)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await;
    match result {
        Ok(t) => {
            debug!("🗃️ Ticket #{} created for order {order_id}", t.id);
            Ok(t)
        },
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(TicketApiError::OrderNotFound(order_id)),
        Err(e) => Err(e.into()),
    }
}

/// Applies a partial update to a ticket. Terminal statuses stamp `resolved_at`.
pub async fn update_ticket(
    id: i64,
    update: TicketUpdate,
    now: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Ticket, TicketApiError> {
    if update.is_empty() {
        debug!("🗃️ No fields to update for ticket {id}. Update request skipped.");
        return Err(TicketApiError::EmptyUpdate);
    }
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE tickets SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(status) = update.status {
        set_clause.push("status = ");
        set_clause.push_bind_unseparated(status);
        if status.is_terminal() {
            set_clause.push("resolved_at = ");
            set_clause.push_bind_unseparated(now);
        }
    }
    if let Some(priority) = update.priority {
        set_clause.push("priority = ");
        set_clause.push_bind_unseparated(priority);
    }
    if let Some(assigned_to) = update.assigned_to {
        set_clause.push("assigned_to = ");
        set_clause.push_bind_unseparated(assigned_to);
    }
    if let Some(resolution) = update.resolution {
        set_clause.push("resolution = ");
        set_clause.push_bind_unseparated(resolution);
    }
    set_clause.push("updated_at = ");
    set_clause.push_bind_unseparated(now);
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let ticket = builder.build_query_as::<Ticket>().fetch_optional(conn).await?;
    ticket.ok_or(TicketApiError::TicketNotFound(id))
}

pub async fn fetch_tickets_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Ticket>, TicketApiError> {
    let tickets = sqlx::query_as("SELECT * FROM tickets WHERE order_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(tickets)
}

/// Open and in-progress tickets, by priority rank (urgent first) and then newest first.
pub async fn fetch_open_tickets(conn: &mut SqliteConnection) -> Result<Vec<Ticket>, TicketApiError> {
    let tickets = sqlx::query_as(
        r#"
            SELECT * FROM tickets
            WHERE status IN ('open', 'in_progress')
            ORDER BY
                CASE priority WHEN 'urgent' THEN 4 WHEN 'high' THEN 3 WHEN 'medium' THEN 2 ELSE 1 END DESC,
                created_at DESC,
                id DESC
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(tickets)
}
