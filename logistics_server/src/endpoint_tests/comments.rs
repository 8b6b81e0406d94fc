use actix_web::{http::StatusCode, web, web::ServiceConfig};
use logistics_engine::{
    db_types::{Comment, NewComment},
    CommentApi,
    CommentApiError,
};
use serde_json::json;

use super::{
    helpers::{get_request, json, post_request, timestamp},
    mocks::MockCommentManager,
};
use crate::routes::{CommentsForOrderRoute, CreateCommentRoute};

fn stored(id: i64, comment: NewComment) -> Comment {
    Comment {
        id,
        order_id: comment.order_id,
        comment: comment.comment,
        user_name: comment.user_name,
        created_at: timestamp(10, 9),
    }
}

#[actix_web::test]
async fn create_comment_with_default_author() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCommentManager::new();
    db.expect_insert_comment().withf(|c| c.user_name == "Sistema").returning(|c| Ok(stored(11, c)));
    let body = json!({"order_id": 3, "comment": "Customer asked for a morning delivery"});
    let (status, body) = post_request("/comments/", &body, configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let comment = json(&body);
    assert_eq!(comment["id"], 11);
    assert_eq!(comment["user_name"], "Sistema");
    assert_eq!(comment["comment"], "Customer asked for a morning delivery");
}

#[actix_web::test]
async fn comment_failures_are_bad_requests() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCommentManager::new();
    db.expect_insert_comment().never();
    let comment = NewComment::new(3, "");
    let (status, _) = post_request("/comments", &comment, configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut db = MockCommentManager::new();
    db.expect_insert_comment().returning(|c| Err(CommentApiError::OrderNotFound(c.order_id)));
    let comment = NewComment::new(77, "Left at reception").with_author("bodega");
    let (status, body) = post_request("/comments", &comment, configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "Could not read request body: Order 77 does not exist");
}

#[actix_web::test]
async fn comments_for_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCommentManager::new();
    db.expect_fetch_comments_for_order().withf(|id| *id == 3).returning(|order_id| {
        Ok(vec![
            stored(2, NewComment::new(order_id, "Re-scheduled").with_author("ana")),
            stored(1, NewComment::new(order_id, "Called customer")),
        ])
    });
    let (status, body) = get_request("/comments/order/3", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let comments = json(&body);
    assert_eq!(comments[0]["id"], 2);
    assert_eq!(comments[0]["user_name"], "ana");
    assert_eq!(comments[1]["user_name"], "Sistema");
}

fn configure(db: MockCommentManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let comments_api = CommentApi::new(db);
        cfg.service(CreateCommentRoute::<MockCommentManager>::new())
            .service(CommentsForOrderRoute::<MockCommentManager>::new())
            .app_data(web::Data::new(comments_api));
    }
}
