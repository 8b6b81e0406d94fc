use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{Logger, NormalizePath, TrailingSlash},
    web,
    App,
    HttpServer,
};
use log::*;
use logistics_engine::{CommentApi, OrderApi, SqliteDatabase, TicketApi};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{FalabellaIntegration, MercadoLibreIntegration},
    routes::{
        health,
        root,
        CommentsForOrderRoute,
        CreateCommentRoute,
        CreateTicketRoute,
        DashboardStatsRoute,
        DelayedOrdersRoute,
        DeliveredOrdersRoute,
        OpenTicketsRoute,
        OrderByIdRoute,
        OrdersAtRiskRoute,
        OrdersRoute,
        OrdersToShipRoute,
        OrdersTodayRoute,
        SyncAllRoute,
        SyncFalabellaRoute,
        SyncMercadolibreRoute,
        TicketsForOrderRoute,
        UpdateTicketRoute,
    },
    sync_service::SyncService,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let falabella = FalabellaIntegration::new(config.falabella.clone())
        .map_err(|e| ServerError::InitializeError(format!("Falabella client: {e}")))?;
    let mercadolibre = MercadoLibreIntegration::new(config.mercadolibre.clone())
        .map_err(|e| ServerError::InitializeError(format!("MercadoLibre client: {e}")))?;
    let (host, port) = (config.host.clone(), config.port);
    let cors_origins = config.cors_origins.clone();
    let config = web::Data::new(config);
    let srv = HttpServer::new(move || {
        let orders_api = OrderApi::new(db.clone());
        let tickets_api = TicketApi::new(db.clone());
        let comments_api = CommentApi::new(db.clone());
        let sync_service = SyncService::new(OrderApi::new(db.clone()), falabella.clone(), mercadolibre.clone());
        let api_scope = web::scope("/api/v1")
            .service(OrdersRoute::<SqliteDatabase>::new())
            .service(OrdersTodayRoute::<SqliteDatabase>::new())
            .service(DelayedOrdersRoute::<SqliteDatabase>::new())
            .service(OrdersAtRiskRoute::<SqliteDatabase>::new())
            .service(OrdersToShipRoute::<SqliteDatabase>::new())
            .service(DeliveredOrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(DashboardStatsRoute::<SqliteDatabase>::new())
            .service(CreateTicketRoute::<SqliteDatabase>::new())
            .service(OpenTicketsRoute::<SqliteDatabase>::new())
            .service(TicketsForOrderRoute::<SqliteDatabase>::new())
            .service(UpdateTicketRoute::<SqliteDatabase>::new())
            .service(CreateCommentRoute::<SqliteDatabase>::new())
            .service(CommentsForOrderRoute::<SqliteDatabase>::new())
            .service(SyncAllRoute::<SqliteDatabase>::new())
            .service(SyncFalabellaRoute::<SqliteDatabase>::new())
            .service(SyncMercadolibreRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(cors_layer(&cors_origins))
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("logistics::access_log"))
            .app_data(config.clone())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(tickets_api))
            .app_data(web::Data::new(comments_api))
            .app_data(web::Data::new(sync_service))
            .service(root)
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    info!("💻️ Listening on {host}:{port}");
    Ok(srv)
}

/// CORS for the browser dashboard. An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> Cors {
    let cors = Cors::default().allow_any_method().allow_any_header().supports_credentials().max_age(3600);
    if origins.is_empty() {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
