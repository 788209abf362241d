//! HTTP binding for JwsAuth: login, refresh and bearer-protected routes

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod telemetry;

pub use app::{configure_routes, AppState};
