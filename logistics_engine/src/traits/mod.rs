mod comment_management;
mod order_management;
mod ticket_management;

pub use comment_management::{CommentApiError, CommentManagement};
pub use order_management::{OrderApiError, OrderManagement};
pub use ticket_management::{TicketApiError, TicketManagement};
