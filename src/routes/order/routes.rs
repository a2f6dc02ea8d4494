use super::handlers::{
    complain_order, create_order_req, deliver_order, fetch_my_orders, fetch_order, pay_order,
    select_shipper, submit_bid, update_shipping_status,
};
use crate::middleware::RequireAuth;
use actix_web::web;

pub fn order_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create")
            .route(web::post().to(create_order_req))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/mine")
            .route(web::get().to(fetch_my_orders))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/pay")
            .route(web::put().to(pay_order))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/deliver")
            .route(web::put().to(deliver_order))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/bid")
            .route(web::post().to(submit_bid))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/select-shipper")
            .route(web::put().to(select_shipper))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/shipping-status")
            .route(web::put().to(update_shipping_status))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}/complain")
            .route(web::put().to(complain_order))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{order_id}")
            .route(web::get().to(fetch_order))
            .wrap(RequireAuth),
    );
}
