use super::handlers::{health_check, paypal_client_id};
use actix_web::web;

pub fn util_route(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .route("/config/paypal", web::get().to(paypal_client_id));
}
