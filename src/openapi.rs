use crate::routes::{order, user, util};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        util::handlers::health_check,
        util::handlers::paypal_client_id,
        user::handlers::register_user_account,
        user::handlers::authenticate,
        user::handlers::fetch_user_profile,
        user::handlers::update_user_profile,
        user::handlers::update_home_address,
        user::handlers::add_user_warning,
        order::handlers::create_order_req,
        order::handlers::fetch_my_orders,
        order::handlers::fetch_order,
        order::handlers::pay_order,
        order::handlers::deliver_order,
        order::handlers::submit_bid,
        order::handlers::select_shipper,
        order::handlers::update_shipping_status,
        order::handlers::complain_order,
    ),
    tags(
        (name = "Marketplace Order REST API", description = "Marketplace order and user profile endpoints"),
        (name = "Util", description = "Health check and client configuration"),
        (name = "User", description = "Registration, authentication and profiles"),
        (name = "Order", description = "Checkout, payment, shipper bidding, delivery and complaints"),
    ),
)]
pub struct ApiDoc {}
