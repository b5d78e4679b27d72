pub mod app;
pub mod auth_middleware;
pub mod bootstrap;
pub mod config;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
