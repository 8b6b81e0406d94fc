use cucumber::World;
use logistics_engine::{
    db_types::{Order, Platform, Ticket},
    CommentApi,
    OrderApi,
    SqliteDatabase,
    TicketApi,
};

use crate::support::prepare_test_db;

#[derive(Default, Debug, World)]
pub struct LogisticsWorld {
    pub system: Option<LogisticsSystem>,
}

#[derive(Debug)]
pub struct LogisticsSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
    pub orders: OrderApi<SqliteDatabase>,
    pub tickets: TicketApi<SqliteDatabase>,
    pub comments: CommentApi<SqliteDatabase>,
    /// The ticket most recently created or updated by a step.
    pub current_ticket: Option<Ticket>,
    pub last_error: Option<String>,
}

impl LogisticsWorld {
    pub fn system(&mut self) -> &mut LogisticsSystem {
        self.system.as_mut().expect("Logistics system not initialised")
    }

    pub async fn order(&mut self, platform: Platform, external_id: &str) -> Order {
        self.system()
            .orders
            .order_by_external_id(platform, external_id)
            .await
            .expect("Error fetching order")
            .unwrap_or_else(|| panic!("{platform} order {external_id} does not exist"))
    }

    pub fn current_ticket(&mut self) -> Ticket {
        self.system().current_ticket.clone().expect("No ticket has been created yet")
    }
}

impl LogisticsSystem {
    pub async fn new() -> Self {
        let (db_path, db) = prepare_test_db().await;
        Self {
            db_path,
            orders: OrderApi::new(db.clone()),
            tickets: TicketApi::new(db.clone()),
            comments: CommentApi::new(db.clone()),
            db,
            current_ticket: None,
            last_error: None,
        }
    }
}
