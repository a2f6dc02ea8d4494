use super::schemas::{
    ComplainRequest, CreateOrderRequest, Order, OrderDetailData, PayOrderRequest,
    SelectShipperRequest, ShipperBid, ShippingStatusRequest, SubmitBidRequest,
};
use super::utils::{
    build_complaint, create_order, fetch_orders_by_buyer, get_order, mark_order_delivered,
    mark_order_paid, save_complaint, save_shipper_bid, save_shipping_status, select_order_shipper,
};
use super::views::{
    can_view_order, ensure_can_bid, ensure_can_complain, ensure_can_deliver, ensure_can_pay,
    ensure_can_update_shipping_status, get_order_view_state,
};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;
use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

fn stale_order_error() -> GenericError {
    GenericError::ValidationError("Order changed in the meantime, please reload it".to_string())
}

#[utoipa::path(
    post,
    path = "/order/create",
    tag = "Order",
    request_body(content = CreateOrderRequest, description = "Request Body"),
    params(
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Order created", body= GenericResponse<Order>),
        (status=400, description= "Invalid request", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Create Order", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn create_order_req(
    body: CreateOrderRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<Order>>, GenericError> {
    let order = create_order(&pool, &user, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created order",
        Some(order),
    )))
}

#[utoipa::path(
    get,
    path = "/order/mine",
    tag = "Order",
    params(
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Orders placed by the caller, newest first", body= GenericResponse<Vec<Order>>),
    )
)]
#[tracing::instrument(err, name = "Fetch My Orders", skip(pool, user), fields(user_id = %user.id))]
pub async fn fetch_my_orders(
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<Order>>>, GenericError> {
    let orders = fetch_orders_by_buyer(&pool, user.id).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched orders",
        Some(orders),
    )))
}

#[utoipa::path(
    get,
    path = "/order/{order_id}",
    tag = "Order",
    description = "Order detail together with what the caller is allowed to see and do.",
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Order detail", body= GenericResponse<OrderDetailData>),
        (status=403, description= "Not a participant of this order", body= GenericResponse<TupleUnit>),
        (status=410, description= "Order not found", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Fetch Order", skip(pool, user), fields(user_id = %user.id))]
pub async fn fetch_order(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<OrderDetailData>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    if !can_view_order(&order, &user) {
        return Err(GenericError::InsufficientPrivilegeError(
            "Not allowed to view this order".to_string(),
        ));
    }
    let view = get_order_view_state(&order, &user);
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched order",
        Some(OrderDetailData { order, view }),
    )))
}

#[utoipa::path(
    put,
    path = "/order/{order_id}/pay",
    tag = "Order",
    request_body(content = PayOrderRequest, description = "Payment confirmation as reported by the payment widget"),
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Order paid", body= GenericResponse<TupleUnit>),
        (status=400, description= "Order already paid", body= GenericResponse<TupleUnit>),
        (status=403, description= "Not the buyer", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Pay Order", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn pay_order(
    path: web::Path<Uuid>,
    body: PayOrderRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    ensure_can_pay(&order, &user)?;
    if !mark_order_paid(&pool, order.id, &body.payment_result).await? {
        return Err(stale_order_error());
    }
    Ok(web::Json(GenericResponse::success("Order is paid", Some(()))))
}

#[utoipa::path(
    put,
    path = "/order/{order_id}/deliver",
    tag = "Order",
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Order delivered", body= GenericResponse<TupleUnit>),
        (status=400, description= "Order unpaid or already delivered", body= GenericResponse<TupleUnit>),
        (status=403, description= "Admin only", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Deliver Order", skip(pool, user), fields(user_id = %user.id))]
pub async fn deliver_order(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    ensure_can_deliver(&order, &user)?;
    if !mark_order_delivered(&pool, order.id).await? {
        return Err(stale_order_error());
    }
    Ok(web::Json(GenericResponse::success(
        "Order is delivered",
        Some(()),
    )))
}

#[utoipa::path(
    post,
    path = "/order/{order_id}/bid",
    tag = "Order",
    request_body(content = SubmitBidRequest, description = "Request Body"),
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Bid saved", body= GenericResponse<TupleUnit>),
        (status=400, description= "Shipper already selected", body= GenericResponse<TupleUnit>),
        (status=403, description= "Shippers only", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Submit Shipper Bid", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn submit_bid(
    path: web::Path<Uuid>,
    body: SubmitBidRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    ensure_can_bid(&order, &user)?;
    let bid = ShipperBid {
        shipper_id: user.id,
        shipper_name: user.name,
        price: body.price,
    };
    save_shipper_bid(&pool, order.id, bid).await?;
    Ok(web::Json(GenericResponse::success("Bid saved", Some(()))))
}

#[utoipa::path(
    put,
    path = "/order/{order_id}/select-shipper",
    tag = "Order",
    description = "Assigns the shipper. A justification is required when a cheaper bid from another shipper exists.",
    request_body(content = SelectShipperRequest, description = "Request Body"),
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Shipper selected", body= GenericResponse<TupleUnit>),
        (status=400, description= "Unknown bid, price mismatch, missing justification or shipper already selected", body= GenericResponse<TupleUnit>),
        (status=403, description= "Sellers and admins only", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Select Shipper", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn select_shipper(
    path: web::Path<Uuid>,
    body: SelectShipperRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    select_order_shipper(&pool, path.into_inner(), &user, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Shipper selected",
        Some(()),
    )))
}

#[utoipa::path(
    put,
    path = "/order/{order_id}/shipping-status",
    tag = "Order",
    request_body(content = ShippingStatusRequest, description = "Request Body"),
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Shipping status updated", body= GenericResponse<TupleUnit>),
        (status=400, description= "Order already delivered", body= GenericResponse<TupleUnit>),
        (status=403, description= "Assigned shipper or admin only", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Update Shipping Status", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn update_shipping_status(
    path: web::Path<Uuid>,
    body: ShippingStatusRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    ensure_can_update_shipping_status(&order, &user)?;
    if !save_shipping_status(&pool, order.id, body.shipping_status.trim()).await? {
        return Err(stale_order_error());
    }
    Ok(web::Json(GenericResponse::success(
        "Shipping status updated",
        Some(()),
    )))
}

#[utoipa::path(
    put,
    path = "/order/{order_id}/complain",
    tag = "Order",
    request_body(content = ComplainRequest, description = "Request Body"),
    params(
        ("order_id" = String, Path, description = "Order id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Complaint filed", body= GenericResponse<TupleUnit>),
        (status=400, description= "Not delivered or complaint already filed", body= GenericResponse<TupleUnit>),
        (status=403, description= "Buyer only", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Complain Order", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn complain_order(
    path: web::Path<Uuid>,
    body: ComplainRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let order = get_order(&pool, path.into_inner()).await?;
    ensure_can_complain(&order, &user)?;
    let complaint = build_complaint(&body, &user)?;
    if !save_complaint(&pool, order.id, &complaint).await? {
        return Err(GenericError::ValidationError(
            "A complaint was already filed for this order".to_string(),
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Complaint filed",
        Some(()),
    )))
}
