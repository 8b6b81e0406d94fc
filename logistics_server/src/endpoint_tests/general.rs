use actix_web::{
    http::{header, Method, StatusCode},
    test,
    test::TestRequest,
    web,
    App,
};

use super::helpers::{get_request, json};
use crate::{
    config::ServerConfig,
    routes::{health, root},
    server::cors_layer,
};

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/health", |cfg| {
        cfg.service(health);
    })
    .await
    .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "ok");
}

#[actix_web::test]
async fn root_reports_name_and_version() {
    let _ = env_logger::try_init().ok();
    let config = ServerConfig { app_name: "Bodega Central".into(), ..Default::default() };
    let (status, body) = get_request("/", move |cfg| {
        cfg.service(root).app_data(web::Data::new(config));
    })
    .await
    .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let info = json(&body);
    assert_eq!(info["message"], "Bodega Central");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
}

//----------------------------------------------   CORS  ----------------------------------------------------
async fn preflight(origins: &[String], origin: &str) -> (StatusCode, Option<String>) {
    let app = test::init_service(App::new().wrap(cors_layer(origins)).service(health)).await;
    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/health")
        .insert_header((header::ORIGIN, origin))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    // A rejected preflight may come back as an error rather than a response
    let (status, headers) = match test::try_call_service(&app, req).await {
        Ok(res) => (res.status(), res.headers().clone()),
        Err(e) => {
            let res = e.error_response();
            (res.status(), res.headers().clone())
        },
    };
    let allowed = headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()).map(String::from);
    (status, allowed)
}

#[actix_web::test]
async fn any_origin_may_call_by_default() {
    let _ = env_logger::try_init().ok();
    let (status, allowed) = preflight(&[], "http://localhost:5173").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));

    let app = test::init_service(App::new().wrap(cors_layer(&[])).service(health)).await;
    let req = TestRequest::get().uri("/health").insert_header((header::ORIGIN, "https://ops.example.com")).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let allowed = res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some("https://ops.example.com"));
}

#[actix_web::test]
async fn configured_origins_are_enforced() {
    let _ = env_logger::try_init().ok();
    let origins = vec!["https://ops.example.com".to_string()];
    let (status, allowed) = preflight(&origins, "https://ops.example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowed.as_deref(), Some("https://ops.example.com"));
    let (status, allowed) = preflight(&origins, "https://elsewhere.example.com").await;
    assert_ne!(status, StatusCode::OK);
    assert!(allowed.is_none());
}
