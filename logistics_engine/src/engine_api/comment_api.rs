use std::fmt::Debug;

use crate::{
    db_types::{Comment, NewComment},
    traits::{CommentApiError, CommentManagement},
};

pub struct CommentApi<B> {
    db: B,
}

impl<B: Debug> Debug for CommentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CommentApi ({:?})", self.db)
    }
}

impl<B> CommentApi<B>
where B: CommentManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_comment(&self, comment: NewComment) -> Result<Comment, CommentApiError> {
        if comment.comment.trim().is_empty() {
            return Err(CommentApiError::InvalidComment("comment cannot be empty".into()));
        }
        self.db.insert_comment(comment).await
    }

    pub async fn comments_for_order(&self, order_id: i64) -> Result<Vec<Comment>, CommentApiError> {
        self.db.fetch_comments_for_order(order_id).await
    }
}
