//! Thin REST clients for the two marketplaces the logistics backend aggregates.
//!
//! The clients in this crate are fail-closed: every network, HTTP or decoding failure is returned to the caller
//! as a [`MarketplaceApiError`]. Deciding what to do with a failure (e.g. treating it as "no orders") is the job
//! of the integration layer in the server.
mod config;
mod error;
mod falabella_api;
mod falabella_order;
mod helpers;
mod mercadolibre_api;
mod mercadolibre_objects;
mod rest_client;

pub use config::{FalabellaConfig, MercadoLibreConfig, DEFAULT_FALABELLA_BASE_URL, DEFAULT_MELI_BASE_URL};
pub use error::MarketplaceApiError;
pub use falabella_api::{FalabellaApi, FalabellaOrderQuery};
pub use falabella_order::{FalabellaAddress, FalabellaOrder};
pub use helpers::value_to_string;
pub use mercadolibre_api::{MeliOrderSearch, MercadoLibreApi};
pub use mercadolibre_objects::{
    meli_shipment_id,
    MeliAddress,
    MeliBuyer,
    MeliDateRef,
    MeliDestination,
    MeliEnrichedOrder,
    MeliLeadTime,
    MeliLogistic,
    MeliOrder,
    MeliPhone,
    MeliShipment,
    MeliShippingRef,
};
pub use rest_client::RestClient;
