//! HTTP API: configuration, authentication, per-route role guards and handlers.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
