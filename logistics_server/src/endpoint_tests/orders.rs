use actix_web::{http::StatusCode, web, web::ServiceConfig};
use logistics_engine::{
    db_types::{DashboardStats, OrderStatusType, OrderView, Pagination},
    OrderApi,
    OrderApiError,
};

use super::{
    helpers::{get_request, json, sample_order},
    mocks::MockOrderManager,
};
use crate::routes::{
    DashboardStatsRoute,
    DelayedOrdersRoute,
    DeliveredOrdersRoute,
    OrderByIdRoute,
    OrdersAtRiskRoute,
    OrdersRoute,
    OrdersToShipRoute,
    OrdersTodayRoute,
};

#[actix_web::test]
async fn fetch_orders_with_default_page() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_orders()
        .withf(|page| *page == Pagination { limit: 100, offset: 0 })
        .returning(|_| Ok(vec![sample_order(2), sample_order(1)]));
    let (status, body) = get_request("/orders", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let orders = json(&body);
    assert_eq!(orders.as_array().map(|a| a.len()), Some(2));
    assert_eq!(orders[0]["id"], 2);
    assert_eq!(orders[0]["platform"], "falabella");
    assert_eq!(orders[0]["shipping_type"], "falabella_normal");
    assert_eq!(orders[0]["current_status"], "listo_despachar");
}

#[actix_web::test]
async fn trailing_slash_is_ignored() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_orders()
        .withf(|page| *page == Pagination { limit: 10, offset: 20 })
        .returning(|_| Ok(vec![]));
    let (status, body) = get_request("/orders/?limit=10&offset=20", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn page_size_is_limited() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_orders().never();
    let (status, body) = get_request("/orders?limit=501", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "Invalid query parameter. limit must be between 1 and 500, got 501");

    let mut db = MockOrderManager::new();
    db.expect_fetch_orders().never();
    let (status, _) = get_request("/orders?limit=0", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut db = MockOrderManager::new();
    db.expect_fetch_orders().never();
    let (status, _) = get_request("/orders?offset=-1", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_order_by_id().withf(|id| *id == 7).returning(|id| Ok(Some(sample_order(id))));
    let (status, body) = get_request("/orders/7", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let order = json(&body);
    assert_eq!(order["id"], 7);
    assert_eq!(order["external_order_id"], "F-7");
    assert_eq!(order["limite_despacho"], "2024-03-11T18:00:00Z");
}

#[actix_web::test]
async fn missing_order_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_order_by_id().returning(|_| Ok(None));
    let (status, body) = get_request("/orders/99", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"], "The data was not found. Order 99 not found");
}

#[actix_web::test]
async fn fixed_views_are_not_order_ids() {
    let _ = env_logger::try_init().ok();
    let cases = [
        ("/orders/today", OrderView::Today),
        ("/orders/delayed", OrderView::Delayed),
        ("/orders/at-risk", OrderView::AtRisk),
        ("/orders/to-ship", OrderView::ToShip),
    ];
    for (path, view) in cases {
        let mut db = MockOrderManager::new();
        db.expect_fetch_order_by_id().never();
        db.expect_fetch_order_view().withf(move |v| *v == view).times(1).returning(|_| Ok(vec![sample_order(3)]));
        let (status, body) = get_request(path, configure(db)).await.expect("Request failed");
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(json(&body)[0]["id"], 3, "{path}");
    }
}

#[actix_web::test]
async fn delivered_orders_are_capped() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_delivered_orders().withf(|limit| *limit == 100).returning(|_| {
        let mut order = sample_order(4);
        order.current_status = OrderStatusType::Entregado;
        Ok(vec![order])
    });
    let (status, body) = get_request("/orders/delivered", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)[0]["current_status"], "entregado");
}

#[actix_web::test]
async fn view_query_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_order_view().returning(|_| Err(OrderApiError::DatabaseError("disk I/O error".into())));
    let (status, body) = get_request("/orders/delayed", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["error"].as_str().unwrap().contains("disk I/O error"));
}

//----------------------------------------------   Dashboard  ----------------------------------------------------
#[actix_web::test]
async fn dashboard_stats() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_dashboard_stats().returning(|| {
        Ok(DashboardStats {
            orders_today: 4,
            orders_delayed: 2,
            orders_ready_to_ship: 9,
            orders_shipped: 12,
            orders_delivered_today: 3,
            avg_delay_hours: 5.5,
        })
    });
    let (status, body) = get_request("/dashboard/stats", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let stats = json(&body);
    assert_eq!(stats["orders_today"], 4);
    assert_eq!(stats["orders_ready_to_ship"], 9);
    assert_eq!(stats["avg_delay_hours"], 5.5);
    assert!(stats.get("error").is_none());
}

#[actix_web::test]
async fn dashboard_falls_back_to_zeroes() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_dashboard_stats()
        .returning(|| Err(OrderApiError::DatabaseError("no such table: dashboard_stats".into())));
    let (status, body) = get_request("/dashboard/stats", configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let stats = json(&body);
    assert_eq!(stats["orders_today"], 0);
    assert_eq!(stats["orders_delayed"], 0);
    assert_eq!(stats["orders_shipped"], 0);
    assert_eq!(stats["error"], "Database error: no such table: dashboard_stats");
}

fn configure(db: MockOrderManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let orders_api = OrderApi::new(db);
        cfg.service(OrdersRoute::<MockOrderManager>::new())
            .service(OrdersTodayRoute::<MockOrderManager>::new())
            .service(DelayedOrdersRoute::<MockOrderManager>::new())
            .service(OrdersAtRiskRoute::<MockOrderManager>::new())
            .service(OrdersToShipRoute::<MockOrderManager>::new())
            .service(DeliveredOrdersRoute::<MockOrderManager>::new())
            .service(OrderByIdRoute::<MockOrderManager>::new())
            .service(DashboardStatsRoute::<MockOrderManager>::new())
            .app_data(web::Data::new(orders_api));
    }
}
