//! # Unified logistics server
//! This crate hosts the HTTP server for the unified logistics backend. It is responsible for:
//! * Pulling orders from Falabella and MercadoLibre and normalising them into the canonical order model.
//! * Serving read-only order views (today, delayed, at risk, to ship, delivered) and dashboard counters.
//! * Ticket and comment workflows attached to orders.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/`: Service name and version.
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/v1/orders/...`: Order listings and views.
//! * `/api/v1/tickets/...` and `/api/v1/comments/...`: Order follow-up.
//! * `/api/v1/dashboard/stats`: Dashboard counters.
//! * `/api/v1/sync/...`: Triggers a marketplace sync.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;
pub mod sync_service;

#[cfg(test)]
mod endpoint_tests;
