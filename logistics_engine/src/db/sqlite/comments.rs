use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Comment, NewComment},
    traits::CommentApiError,
};

pub async fn insert_comment(
    comment: NewComment,
    now: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Comment, CommentApiError> {
    let order_id = comment.order_id;
    let result = sqlx::query_as::<_, Comment>(
        "INSERT INTO order_comments (order_id, comment, user_name, created_at) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(comment.order_id)
    .bind(comment.comment)
    .bind(comment.user_name)
    .bind(now)
    .fetch_one(conn)
    .await;
    match result {
        Ok(c) => {
            debug!("🗃️ Comment #{} added to order {order_id}", c.id);
            Ok(c)
        },
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(CommentApiError::OrderNotFound(order_id)),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_comments_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Comment>, CommentApiError> {
    let comments =
        sqlx::query_as("SELECT * FROM order_comments WHERE order_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(order_id)
            .fetch_all(conn)
            .await?;
    Ok(comments)
}
