use std::str::FromStr;

use chrono::{Duration, Utc};
use cucumber::{given, then, when};
use logistics_engine::{
    db_types::{
        NewComment,
        NewOrder,
        NewTicket,
        OrderStatusType,
        Platform,
        ShippingType,
        TicketPriority,
        TicketStatus,
        TicketUpdate,
    },
    TicketApiError,
};

use crate::cucumber::LogisticsWorld;

fn platform(s: &str) -> Platform {
    Platform::from_str(s).expect("Not a valid platform")
}

fn default_shipping(platform: Platform) -> ShippingType {
    match platform {
        Platform::Falabella => ShippingType::FalabellaNormal,
        Platform::MercadoLibre => ShippingType::MeliCentroEnvios,
    }
}

async fn receive_order(world: &mut LogisticsWorld, platform: Platform, id: String, offset: Duration, status: OrderStatusType) {
    let deadline = Utc::now() + offset;
    let order = NewOrder::new(platform, id, default_shipping(platform), deadline).with_status(status);
    world.system().orders.upsert_order(order).await.expect("Error upserting order");
}

//----------------------------------------------   Orders  ----------------------------------------------------

#[given(expr = "{word} order {word} arrives with a deadline {int} hours from now")]
#[when(expr = "{word} order {word} arrives with a deadline {int} hours from now")]
async fn order_due_in(world: &mut LogisticsWorld, p: String, id: String, hours: i64) {
    receive_order(world, platform(&p), id, Duration::hours(hours), OrderStatusType::ListoDespachar).await;
}

#[given(expr = "{word} order {word} arrives with a deadline {int} hours ago")]
#[when(expr = "{word} order {word} arrives with a deadline {int} hours ago")]
async fn order_overdue(world: &mut LogisticsWorld, p: String, id: String, hours: i64) {
    receive_order(world, platform(&p), id, -Duration::hours(hours), OrderStatusType::ListoDespachar).await;
}

#[when(expr = "{word} order {word} arrives with status {word} and a deadline {int} hours ago")]
async fn order_with_status(world: &mut LogisticsWorld, p: String, id: String, status: String, hours: i64) {
    let status = OrderStatusType::from_str(&status).expect("Not a valid order status");
    receive_order(world, platform(&p), id, -Duration::hours(hours), status).await;
}

#[then(expr = "there is/are {int} order(s) in the database")]
async fn count_orders(world: &mut LogisticsWorld, count: usize) {
    let orders = world.system().orders.all_orders(Default::default()).await.expect("Error fetching orders");
    assert_eq!(orders.len(), count);
}

#[then(expr = "{word} order {word} is not delayed")]
async fn not_delayed(world: &mut LogisticsWorld, p: String, id: String) {
    let order = world.order(platform(&p), &id).await;
    assert!(!order.is_delayed, "Order is delayed");
    assert_eq!(order.hours_delayed, 0);
}

#[then(expr = "{word} order {word} is delayed by {int} hours")]
async fn delayed_by(world: &mut LogisticsWorld, p: String, id: String, hours: i64) {
    let order = world.order(platform(&p), &id).await;
    assert!(order.is_delayed, "Order is not delayed");
    assert_eq!(order.hours_delayed, hours);
    assert!(order.delay_detected_at.is_some(), "Delay detection time was not recorded");
}

#[then(expr = "{word} order {word} has a resolved delay")]
async fn resolved_delay(world: &mut LogisticsWorld, p: String, id: String) {
    let order = world.order(platform(&p), &id).await;
    assert!(order.delay_detected_at.is_some(), "Delay detection time was lost");
    assert!(order.delay_resolved_at.is_some(), "Delay was not marked as resolved");
}

#[then(expr = "the {word} view contains {int} order(s)")]
async fn view_contains(world: &mut LogisticsWorld, view: String, count: usize) {
    let api = &world.system().orders;
    let orders = match view.as_str() {
        "today" => api.orders_today().await,
        "delayed" => api.delayed_orders().await,
        "at-risk" => api.orders_at_risk().await,
        "to-ship" => api.orders_to_ship().await,
        "delivered" => api.delivered_orders().await,
        v => panic!("Unknown view {v}"),
    }
    .expect("Error fetching order view");
    assert_eq!(orders.len(), count, "Unexpected number of orders in the {view} view");
}

#[then(expr = "the dashboard shows {int} delayed order(s) and {int} order(s) ready to ship")]
async fn dashboard_pending(world: &mut LogisticsWorld, delayed: i64, ready: i64) {
    let stats = world.system().orders.dashboard_stats().await.expect("Error fetching dashboard");
    assert_eq!(stats.orders_delayed, delayed);
    assert_eq!(stats.orders_ready_to_ship, ready);
}

#[then(expr = "the dashboard shows {int} order(s) delivered today")]
async fn dashboard_delivered(world: &mut LogisticsWorld, delivered: i64) {
    let stats = world.system().orders.dashboard_stats().await.expect("Error fetching dashboard");
    assert_eq!(stats.orders_delivered_today, delivered);
}

#[then(expr = "the average delay is about {int} hours")]
async fn dashboard_average(world: &mut LogisticsWorld, hours: i64) {
    let stats = world.system().orders.dashboard_stats().await.expect("Error fetching dashboard");
    #[allow(clippy::cast_precision_loss)]
    let diff = (stats.avg_delay_hours - hours as f64).abs();
    assert!(diff < 0.1, "Average delay was {}", stats.avg_delay_hours);
}

//----------------------------------------------   Tickets  ----------------------------------------------------

#[when(expr = "I open a {word} priority ticket {string} for {word} order {word}")]
async fn open_ticket(world: &mut LogisticsWorld, priority: String, title: String, p: String, id: String) {
    let order = world.order(platform(&p), &id).await;
    let priority = TicketPriority::from_str(&priority).expect("Not a valid priority");
    let ticket = NewTicket::new(order.id, title, "Raised from the warehouse floor")
        .with_priority(priority)
        .with_category("shipping");
    let ticket = world.system().tickets.create_ticket(ticket).await.expect("Error creating ticket");
    world.system().current_ticket = Some(ticket);
}

#[when(expr = "I try to open a ticket for order id {int}")]
async fn open_orphan_ticket(world: &mut LogisticsWorld, order_id: i64) {
    let ticket = NewTicket::new(order_id, "Lost parcel", "No tracking updates");
    match world.system().tickets.create_ticket(ticket).await {
        Ok(t) => panic!("Ticket #{} should not have been created", t.id),
        Err(e) => world.system().last_error = Some(e.to_string()),
    }
}

#[when(expr = "I change the ticket status to {word}")]
async fn change_status(world: &mut LogisticsWorld, status: String) {
    let id = world.current_ticket().id;
    let status = TicketStatus::from_str(&status).expect("Not a valid ticket status");
    let update = TicketUpdate::default().with_status(status);
    let ticket = world.system().tickets.update_ticket(id, update).await.expect("Error updating ticket");
    world.system().current_ticket = Some(ticket);
}

#[when(expr = "I assign the ticket to {string} and start work")]
async fn assign_ticket(world: &mut LogisticsWorld, assignee: String) {
    let id = world.current_ticket().id;
    let update = TicketUpdate::default().with_assignee(assignee).with_status(TicketStatus::InProgress);
    let ticket = world.system().tickets.update_ticket(id, update).await.expect("Error updating ticket");
    world.system().current_ticket = Some(ticket);
}

#[then(expr = "{word} order {word} has {int} ticket(s)")]
async fn tickets_for_order(world: &mut LogisticsWorld, p: String, id: String, count: usize) {
    let order = world.order(platform(&p), &id).await;
    let tickets = world.system().tickets.tickets_for_order(order.id).await.expect("Error fetching tickets");
    assert_eq!(tickets.len(), count);
}

#[then(expr = "the ticket status is {word}")]
async fn ticket_status(world: &mut LogisticsWorld, status: String) {
    let ticket = world.current_ticket();
    assert_eq!(ticket.status.as_str(), status);
}

#[then(expr = "the ticket priority is {word}")]
async fn ticket_priority(world: &mut LogisticsWorld, priority: String) {
    let ticket = world.current_ticket();
    assert_eq!(ticket.priority.as_str(), priority);
}

#[then(expr = "the ticket is assigned to {string}")]
async fn ticket_assignee(world: &mut LogisticsWorld, assignee: String) {
    let ticket = world.current_ticket();
    assert_eq!(ticket.assigned_to.as_deref(), Some(assignee.as_str()));
}

#[then("the ticket has a resolution timestamp")]
async fn has_resolution_time(world: &mut LogisticsWorld) {
    assert!(world.current_ticket().resolved_at.is_some(), "resolved_at was not set");
}

#[then("the ticket has no resolution timestamp")]
async fn no_resolution_time(world: &mut LogisticsWorld) {
    assert!(world.current_ticket().resolved_at.is_none(), "resolved_at should not be set");
}

#[then(expr = "there are {int} open tickets")]
async fn count_open_tickets(world: &mut LogisticsWorld, count: usize) {
    let tickets = world.system().tickets.open_tickets().await.expect("Error fetching open tickets");
    assert_eq!(tickets.len(), count);
}

#[then(expr = "the open tickets are ordered {string}")]
async fn open_ticket_order(world: &mut LogisticsWorld, expected: String) {
    let tickets = world.system().tickets.open_tickets().await.expect("Error fetching open tickets");
    let priorities = tickets.iter().map(|t| t.priority.as_str()).collect::<Vec<&str>>().join(", ");
    assert_eq!(priorities, expected);
}

#[then("the ticket is rejected because the order does not exist")]
async fn ticket_rejected(world: &mut LogisticsWorld) {
    let err = world.system().last_error.clone().expect("No error was recorded");
    assert_eq!(err, TicketApiError::OrderNotFound(999).to_string());
}

//----------------------------------------------   Comments  ----------------------------------------------------

#[when(expr = "{string} comments {string} on {word} order {word}")]
async fn add_comment(world: &mut LogisticsWorld, author: String, text: String, p: String, id: String) {
    let order = world.order(platform(&p), &id).await;
    let comment = NewComment::new(order.id, text).with_author(author);
    world.system().comments.create_comment(comment).await.expect("Error adding comment");
}

#[then(expr = "{word} order {word} has {int} comment(s)")]
async fn count_comments(world: &mut LogisticsWorld, p: String, id: String, count: usize) {
    let order = world.order(platform(&p), &id).await;
    let comments = world.system().comments.comments_for_order(order.id).await.expect("Error fetching comments");
    assert_eq!(comments.len(), count);
}

#[then(expr = "the latest comment on {word} order {word} is {string} by {string}")]
async fn latest_comment(world: &mut LogisticsWorld, p: String, id: String, text: String, author: String) {
    let order = world.order(platform(&p), &id).await;
    let comments = world.system().comments.comments_for_order(order.id).await.expect("Error fetching comments");
    let latest = comments.first().expect("There are no comments");
    assert_eq!(latest.comment, text);
    assert_eq!(latest.user_name, author);
}
