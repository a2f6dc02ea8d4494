pub mod bidding;
pub(crate) mod errors;
pub mod handlers;
mod models;
mod routes;
pub mod schemas;
pub mod utils;
pub mod views;
pub use routes::order_route;
