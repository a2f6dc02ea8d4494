pub mod commands;
pub mod configuration;
pub mod constants;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod schemas;
pub mod startup;
pub mod telemetry;
pub mod utils;
