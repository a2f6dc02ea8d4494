use super::bidding::{apply_bid, validate_bid_selection};
use super::errors::OrderError;
use super::models::{OrderBidsModel, OrderModel};
use super::schemas::{
    ComplainRequest, Complaint, CreateOrderRequest, Order, OrderItem, PaymentResult,
    PriceBreakdown, SelectShipperRequest, ShipperBid,
};
use super::views::{ensure_can_select_shipper, ensure_valid_seller};
use crate::constants::{FLAT_SHIPPING_PRICE, FREE_SHIPPING_THRESHOLD, TAX_RATE_PERCENT};
use crate::routes::user::schemas::UserAccount;
use crate::routes::user::utils::fetch_user_by_id;
use anyhow::Context;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::Utc;
use rand::Rng;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const ORDER_COLUMNS: &str = r#"id, order_items, shipper_bids, shipping_address, payment_method,
    payment_result, items_price, shipping_price, tax_price, total_price, shipping_status,
    select_shipper_justification, buyer_id, seller_id, shipper_id, is_paid, paid_at,
    is_delivered, delivered_at, complain, tracking_no, created_on, updated_on"#;

pub fn round_price(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

pub fn compute_price_breakdown(items: &[OrderItem]) -> PriceBreakdown {
    let items_price = round_price(
        items
            .iter()
            .fold(BigDecimal::zero(), |acc, item| {
                acc + &item.price * BigDecimal::from(item.qty)
            }),
    );
    let shipping_price = if items_price > BigDecimal::from(FREE_SHIPPING_THRESHOLD) {
        BigDecimal::zero()
    } else {
        BigDecimal::from(FLAT_SHIPPING_PRICE)
    };
    let shipping_price = round_price(shipping_price);
    let tax_price =
        round_price(&items_price * BigDecimal::from(TAX_RATE_PERCENT) / BigDecimal::from(100));
    let total_price = round_price(&items_price + &shipping_price + &tax_price);
    PriceBreakdown {
        items_price,
        shipping_price,
        tax_price,
        total_price,
    }
}

/// Random token shaped `4xxx-yxxx-xxxx` with `y` one of `8`, `9`, `a`, `b`.
pub fn generate_tracking_no() -> String {
    let mut rng = rand::rng();
    let variant = ['8', '9', 'a', 'b'][rng.random_range(0..4)];
    format!(
        "4{:03x}-{}{:03x}-{:04x}",
        rng.random_range(0..0x1000u32),
        variant,
        rng.random_range(0..0x1000u32),
        rng.random_range(0..0x10000u32)
    )
}

pub fn build_complaint(body: &ComplainRequest, user: &UserAccount) -> Result<Complaint, OrderError> {
    let clerk_warning = body.clerk_warning.trim();
    let shipper_warning = body.shipper_warning.trim();
    if clerk_warning.is_empty() && shipper_warning.is_empty() {
        return Err(OrderError::ValidationError(
            "Please describe the complaint".to_string(),
        ));
    }
    Ok(Complaint {
        clerk_warning: clerk_warning.to_string(),
        shipper_warning: shipper_warning.to_string(),
        warn_by: user.id,
    })
}

fn database_error(message: &str, e: sqlx::Error) -> OrderError {
    tracing::error!("Failed to execute query: {:?}", e);
    OrderError::DatabaseError(message.to_string(), anyhow::Error::new(e))
}

#[tracing::instrument(name = "Create order", skip(pool, body, user), fields(buyer_id = %user.id))]
pub async fn create_order(
    pool: &PgPool,
    user: &UserAccount,
    body: &CreateOrderRequest,
) -> Result<Order, OrderError> {
    if let Some(seller_id) = body.seller_id {
        let seller = fetch_user_by_id(pool, seller_id).await.map_err(|e| {
            OrderError::DatabaseError("Something went wrong while fetching seller".to_string(), e)
        })?;
        ensure_valid_seller(seller.as_ref())?;
    }
    let prices = compute_price_breakdown(&body.order_items);
    let query = format!(
        r#"
        INSERT INTO purchase_order (id, order_items, shipper_bids, shipping_address,
            payment_method, items_price, shipping_price, tax_price, total_price, buyer_id,
            seller_id, tracking_no, created_on)
        VALUES ($1, $2, '[]'::jsonb, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {}
        "#,
        ORDER_COLUMNS
    );
    let row = sqlx::query_as::<_, OrderModel>(&query)
        .bind(Uuid::new_v4())
        .bind(Json(&body.order_items))
        .bind(Json(&body.shipping_address))
        .bind(&body.payment_method)
        .bind(&prices.items_price)
        .bind(&prices.shipping_price)
        .bind(&prices.tax_price)
        .bind(&prices.total_price)
        .bind(user.id)
        .bind(body.seller_id)
        .bind(generate_tracking_no())
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(|e| database_error("Something went wrong while creating order", e))?;
    Ok(row.into_schema())
}

#[tracing::instrument(name = "Fetch order by id", skip(pool))]
pub async fn fetch_order_by_id(pool: &PgPool, order_id: Uuid) -> Result<Option<Order>, OrderError> {
    let query = format!("SELECT {} FROM purchase_order WHERE id = $1", ORDER_COLUMNS);
    let row = sqlx::query_as::<_, OrderModel>(&query)
        .bind(order_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| database_error("Something went wrong while fetching order", e))?;
    Ok(row.map(OrderModel::into_schema))
}

pub async fn get_order(pool: &PgPool, order_id: Uuid) -> Result<Order, OrderError> {
    fetch_order_by_id(pool, order_id)
        .await?
        .ok_or_else(|| OrderError::NotFoundError("Order not found".to_string()))
}

#[tracing::instrument(name = "Fetch orders by buyer", skip(pool))]
pub async fn fetch_orders_by_buyer(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<Order>, OrderError> {
    let query = format!(
        "SELECT {} FROM purchase_order WHERE buyer_id = $1 ORDER BY created_on DESC",
        ORDER_COLUMNS
    );
    let rows = sqlx::query_as::<_, OrderModel>(&query)
        .bind(buyer_id)
        .fetch_all(pool)
        .await
        .map_err(|e| database_error("Something went wrong while fetching orders", e))?;
    Ok(rows.into_iter().map(OrderModel::into_schema).collect())
}

/// Returns false when the order was already paid.
#[tracing::instrument(name = "Mark order paid", skip(pool, payment_result))]
pub async fn mark_order_paid(
    pool: &PgPool,
    order_id: Uuid,
    payment_result: &PaymentResult,
) -> Result<bool, OrderError> {
    let result = sqlx::query(
        r#"
        UPDATE purchase_order
        SET is_paid = TRUE, paid_at = $3, payment_result = $2, updated_on = $3
        WHERE id = $1 AND is_paid = FALSE
        "#,
    )
    .bind(order_id)
    .bind(Json(payment_result))
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| database_error("Something went wrong while saving payment", e))?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(name = "Mark order delivered", skip(pool))]
pub async fn mark_order_delivered(pool: &PgPool, order_id: Uuid) -> Result<bool, OrderError> {
    let result = sqlx::query(
        r#"
        UPDATE purchase_order
        SET is_delivered = TRUE, delivered_at = $2, updated_on = $2
        WHERE id = $1 AND is_paid = TRUE AND is_delivered = FALSE
        "#,
    )
    .bind(order_id)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| database_error("Something went wrong while marking delivery", e))?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(name = "Lock order bids", skip(transaction))]
async fn fetch_order_bids_for_update(
    transaction: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<OrderBidsModel, OrderError> {
    sqlx::query_as::<_, OrderBidsModel>(
        "SELECT shipper_bids, shipper_id FROM purchase_order WHERE id = $1 FOR UPDATE",
    )
    .bind(order_id)
    .fetch_optional(&mut **transaction)
    .await
    .map_err(|e| database_error("Something went wrong while fetching bids", e))?
    .ok_or_else(|| OrderError::NotFoundError("Order not found".to_string()))
}

#[tracing::instrument(name = "Save shipper bid", skip(pool, bid), fields(shipper_id = %bid.shipper_id))]
pub async fn save_shipper_bid(
    pool: &PgPool,
    order_id: Uuid,
    bid: ShipperBid,
) -> Result<(), OrderError> {
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool")?;
    let current = fetch_order_bids_for_update(&mut transaction, order_id).await?;
    if current.shipper_id.is_some() {
        return Err(OrderError::ValidationError(
            "A shipper is already selected for this order".to_string(),
        ));
    }
    let mut bids = current.shipper_bids.0;
    apply_bid(&mut bids, bid);
    sqlx::query("UPDATE purchase_order SET shipper_bids = $2, updated_on = $3 WHERE id = $1")
        .bind(order_id)
        .bind(Json(&bids))
        .bind(Utc::now())
        .execute(&mut *transaction)
        .await
        .map_err(|e| database_error("Something went wrong while saving bid", e))?;
    transaction
        .commit()
        .await
        .context("Failed to commit SQL transaction to store a shipper bid")?;
    Ok(())
}

#[tracing::instrument(name = "Select order shipper", skip(pool, user, request), fields(shipper_id = %request.shipper_id))]
pub async fn select_order_shipper(
    pool: &PgPool,
    order_id: Uuid,
    user: &UserAccount,
    request: &SelectShipperRequest,
) -> Result<(), OrderError> {
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool")?;
    let query = format!(
        "SELECT {} FROM purchase_order WHERE id = $1 FOR UPDATE",
        ORDER_COLUMNS
    );
    let order = sqlx::query_as::<_, OrderModel>(&query)
        .bind(order_id)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|e| database_error("Something went wrong while fetching order", e))?
        .ok_or_else(|| OrderError::NotFoundError("Order not found".to_string()))?
        .into_schema();
    ensure_can_select_shipper(&order, user)?;
    let justification = validate_bid_selection(&order, request)?;
    sqlx::query(
        r#"
        UPDATE purchase_order
        SET shipper_id = $2, select_shipper_justification = $3, updated_on = $4
        WHERE id = $1 AND shipper_id IS NULL
        "#,
    )
    .bind(order_id)
    .bind(request.shipper_id)
    .bind(justification)
    .bind(Utc::now())
    .execute(&mut *transaction)
    .await
    .map_err(|e| database_error("Something went wrong while selecting shipper", e))?;
    transaction
        .commit()
        .await
        .context("Failed to commit SQL transaction to select a shipper")?;
    Ok(())
}

#[tracing::instrument(name = "Update shipping status", skip(pool))]
pub async fn save_shipping_status(
    pool: &PgPool,
    order_id: Uuid,
    shipping_status: &str,
) -> Result<bool, OrderError> {
    let result = sqlx::query(
        r#"
        UPDATE purchase_order SET shipping_status = $2, updated_on = $3
        WHERE id = $1 AND is_delivered = FALSE
        "#,
    )
    .bind(order_id)
    .bind(shipping_status)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| database_error("Something went wrong while updating shipping status", e))?;
    Ok(result.rows_affected() > 0)
}

/// Returns false when a complaint already exists or the order is not delivered.
#[tracing::instrument(name = "Save complaint", skip(pool, complaint), fields(warn_by = %complaint.warn_by))]
pub async fn save_complaint(
    pool: &PgPool,
    order_id: Uuid,
    complaint: &Complaint,
) -> Result<bool, OrderError> {
    let result = sqlx::query(
        r#"
        UPDATE purchase_order SET complain = $2, updated_on = $3
        WHERE id = $1 AND buyer_id = $4 AND is_delivered = TRUE AND complain IS NULL
        "#,
    )
    .bind(order_id)
    .bind(Json(complaint))
    .bind(Utc::now())
    .bind(complaint.warn_by)
    .execute(pool)
    .await
    .map_err(|e| database_error("Something went wrong while saving complaint", e))?;
    Ok(result.rows_affected() > 0)
}
