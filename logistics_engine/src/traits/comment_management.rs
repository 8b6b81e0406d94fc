use thiserror::Error;

use crate::db_types::{Comment, NewComment};

#[derive(Debug, Clone, Error)]
pub enum CommentApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Invalid comment: {0}")]
    InvalidComment(String),
}

impl From<sqlx::Error> for CommentApiError {
    fn from(e: sqlx::Error) -> Self {
        CommentApiError::DatabaseError(e.to_string())
    }
}

/// Append-only notes attached to orders.
#[allow(async_fn_in_trait)]
pub trait CommentManagement {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, CommentApiError>;

    /// Comments for the order, newest first.
    async fn fetch_comments_for_order(&self, order_id: i64) -> Result<Vec<Comment>, CommentApiError>;
}
