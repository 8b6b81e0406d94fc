//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Database calls and marketplace requests are all async, so a sync
//! in progress does not hold up the worker.
//!
//! Note on route order: the fixed order views (`/orders/today` etc.) must be registered before `/orders/{id}`.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use logistics_engine::{
    db_types::{NewComment, NewTicket, Pagination, TicketUpdate},
    CommentApi,
    CommentManagement,
    OrderApi,
    OrderManagement,
    TicketApi,
    TicketManagement,
};

use crate::{
    config::ServerConfig,
    data_objects::{DashboardResponse, PaginationParams, ServiceInfo, SyncParams, SyncResponse},
    errors::ServerError,
    sync_service::SyncService,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/")]
pub async fn root(config: web::Data<ServerConfig>) -> impl Responder {
    trace!("💻️ Received root request");
    HttpResponse::Ok().json(ServiceInfo::new(config.app_name.as_str()))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(orders => Get "/orders" impl OrderManagement);
/// Route handler for the paginated order list
///
/// Orders are returned newest first. `limit` defaults to 100 and may not exceed 500. `offset` defaults to 0.
pub async fn orders<B: OrderManagement>(
    params: web::Query<PaginationParams>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let page = Pagination::from(params.into_inner());
    debug!("💻️ GET orders. limit {}, offset {}", page.limit, page.offset);
    let orders = api.all_orders(page).await.map_err(|e| {
        debug!("💻️ Could not fetch orders. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_today => Get "/orders/today" impl OrderManagement);
pub async fn orders_today<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders due today");
    let orders = api.orders_today().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(delayed_orders => Get "/orders/delayed" impl OrderManagement);
pub async fn delayed_orders<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET delayed orders");
    let orders = api.delayed_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_at_risk => Get "/orders/at-risk" impl OrderManagement);
pub async fn orders_at_risk<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders at risk");
    let orders = api.orders_at_risk().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_to_ship => Get "/orders/to-ship" impl OrderManagement);
pub async fn orders_to_ship<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders to ship");
    let orders = api.orders_to_ship().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(delivered_orders => Get "/orders/delivered" impl OrderManagement);
pub async fn delivered_orders<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET delivered orders");
    let orders = api.delivered_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/orders/{id}" impl OrderManagement);
pub async fn order_by_id<B: OrderManagement>(
    path: web::Path<i64>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET order #{id}");
    let order = api.order_by_id(id).await?.ok_or_else(|| {
        debug!("💻️ Order #{id} does not exist");
        ServerError::NoRecordFound(format!("Order {id} not found"))
    })?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Dashboard  ----------------------------------------------------
route!(dashboard_stats => Get "/dashboard/stats" impl OrderManagement);
/// Route handler for the dashboard counters
///
/// This endpoint never fails. If the counters cannot be read, zeroes are returned with an `error` field.
pub async fn dashboard_stats<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> HttpResponse {
    debug!("💻️ GET dashboard stats");
    let response = match api.dashboard_stats().await {
        Ok(stats) => DashboardResponse::ok(stats),
        Err(e) => {
            warn!("💻️ Could not fetch dashboard stats. Returning zeroes. {e}");
            DashboardResponse::fallback(e)
        },
    };
    HttpResponse::Ok().json(response)
}

//----------------------------------------------   Tickets  ----------------------------------------------------
route!(create_ticket => Post "/tickets" impl TicketManagement);
pub async fn create_ticket<B: TicketManagement>(
    body: web::Json<NewTicket>,
    api: web::Data<TicketApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let ticket = body.into_inner();
    debug!("💻️ POST ticket for order #{}", ticket.order_id);
    let ticket = api.create_ticket(ticket).await.map_err(|e| {
        debug!("💻️ Could not create ticket. {e}");
        ServerError::InvalidRequestBody(e.to_string())
    })?;
    Ok(HttpResponse::Created().json(ticket))
}

route!(open_tickets => Get "/tickets" impl TicketManagement);
pub async fn open_tickets<B: TicketManagement>(api: web::Data<TicketApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET open tickets");
    let tickets = api.open_tickets().await?;
    Ok(HttpResponse::Ok().json(tickets))
}

route!(tickets_for_order => Get "/tickets/order/{order_id}" impl TicketManagement);
pub async fn tickets_for_order<B: TicketManagement>(
    path: web::Path<i64>,
    api: web::Data<TicketApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET tickets for order #{order_id}");
    let tickets = api.tickets_for_order(order_id).await?;
    Ok(HttpResponse::Ok().json(tickets))
}

route!(update_ticket => Patch "/tickets/{id}" impl TicketManagement);
/// Route handler for partial ticket updates
///
/// Only the fields present in the body are changed. Moving a ticket to `resolved` or `closed` stamps its
/// resolution time. Unknown tickets give a 404 and an update with no fields a 400.
pub async fn update_ticket<B: TicketManagement>(
    path: web::Path<i64>,
    body: web::Json<TicketUpdate>,
    api: web::Data<TicketApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PATCH ticket #{id}");
    let ticket = api.update_ticket(id, body.into_inner()).await.map_err(|e| {
        debug!("💻️ Could not update ticket #{id}. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(ticket))
}

//----------------------------------------------   Comments  ----------------------------------------------------
route!(create_comment => Post "/comments" impl CommentManagement);
pub async fn create_comment<B: CommentManagement>(
    body: web::Json<NewComment>,
    api: web::Data<CommentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let comment = body.into_inner();
    debug!("💻️ POST comment for order #{}", comment.order_id);
    let comment = api.create_comment(comment).await.map_err(|e| {
        debug!("💻️ Could not create comment. {e}");
        ServerError::InvalidRequestBody(e.to_string())
    })?;
    Ok(HttpResponse::Created().json(comment))
}

route!(comments_for_order => Get "/comments/order/{order_id}" impl CommentManagement);
pub async fn comments_for_order<B: CommentManagement>(
    path: web::Path<i64>,
    api: web::Data<CommentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET comments for order #{order_id}");
    let comments = api.comments_for_order(order_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

//----------------------------------------------   Sync  ----------------------------------------------------
route!(sync_all => Post "/sync/all" impl OrderManagement);
/// Route handler for a full marketplace sync
///
/// Runs the Falabella and MercadoLibre syncs back to back and reports both. Pass `only_pending=false` to pull
/// every recent order instead of only those that still have to be dispatched.
pub async fn sync_all<B: OrderManagement>(
    params: web::Query<SyncParams>,
    sync: web::Data<SyncService<B>>,
) -> Result<HttpResponse, ServerError> {
    info!("💻️ POST sync all platforms. only_pending: {}", params.only_pending);
    let result = sync.sync_all_platforms(params.only_pending).await;
    Ok(HttpResponse::Ok().json(SyncResponse::new("Sync completed", result)))
}

route!(sync_falabella => Post "/sync/falabella" impl OrderManagement);
pub async fn sync_falabella<B: OrderManagement>(
    params: web::Query<SyncParams>,
    sync: web::Data<SyncService<B>>,
) -> Result<HttpResponse, ServerError> {
    info!("💻️ POST sync Falabella. only_pending: {}", params.only_pending);
    let result = sync.sync_falabella(params.only_pending).await?;
    Ok(HttpResponse::Ok().json(SyncResponse::new("Falabella sync completed", result)))
}

route!(sync_mercadolibre => Post "/sync/mercadolibre" impl OrderManagement);
pub async fn sync_mercadolibre<B: OrderManagement>(
    params: web::Query<SyncParams>,
    sync: web::Data<SyncService<B>>,
) -> Result<HttpResponse, ServerError> {
    info!("💻️ POST sync MercadoLibre. only_pending: {}", params.only_pending);
    let result = sync.sync_mercadolibre(params.only_pending).await?;
    Ok(HttpResponse::Ok().json(SyncResponse::new("MercadoLibre sync completed", result)))
}
