pub(crate) mod errors;
pub mod handlers;
mod models;
mod routes;
pub mod schemas;
#[cfg(test)]
mod tests;
pub mod utils;
pub mod views;
pub use routes::user_route;
