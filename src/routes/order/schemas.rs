use super::utils::round_price;
use crate::impl_json_from_request;
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_non_negative_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price < &BigDecimal::zero() {
        let mut error = ValidationError::new("negative_price");
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("is required".into());
        return Err(error);
    }
    Ok(())
}

/// Prices arrive as JSON numbers or strings; both are kept at 2 decimal places.
fn deserialize_price<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    BigDecimal::deserialize(deserializer).map(round_price)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub qty: i32,
    pub image: String,
    #[schema(value_type = String)]
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(custom(function = "validate_non_negative_price"))]
    pub price: BigDecimal,
    #[schema(value_type = String)]
    pub product: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, message = "is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "is required"))]
    pub country: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Confirmation reported by the payment widget, stored with the widget's keys.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, Validate)]
pub struct PaymentResult {
    pub id: Option<String>,
    pub status: Option<String>,
    pub update_time: Option<String>,
    pub email_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipperBid {
    #[schema(value_type = String)]
    pub shipper_id: Uuid,
    pub shipper_name: String,
    #[schema(value_type = String)]
    #[serde(deserialize_with = "deserialize_price")]
    pub price: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub clerk_warning: String,
    pub shipper_warning: String,
    #[schema(value_type = String)]
    pub warn_by: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    #[schema(value_type = String)]
    pub items_price: BigDecimal,
    #[schema(value_type = String)]
    pub shipping_price: BigDecimal,
    #[schema(value_type = String)]
    pub tax_price: BigDecimal,
    #[schema(value_type = String)]
    pub total_price: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_result: Option<PaymentResult>,
    #[serde(flatten)]
    pub prices: PriceBreakdown,
    pub shipping_status: Option<String>,
    pub select_shipper_justification: Option<String>,
    #[schema(value_type = String)]
    pub buyer_id: Uuid,
    #[schema(value_type = Option<String>)]
    pub seller_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub shipper_id: Option<Uuid>,
    pub shipper_bids: Vec<ShipperBid>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub complain: Option<Complaint>,
    pub tracking_no: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PaymentStatus {
    Paid { at: Option<DateTime<Utc>> },
    NotPaid,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DeliveryStatus {
    Delivered { at: Option<DateTime<Utc>> },
    NotDelivered,
}

/// What the order detail screen should render for one viewer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderViewState {
    pub show_payment: bool,
    pub can_deliver: bool,
    pub show_complaint_form: bool,
    pub complaint_read_only: bool,
    pub can_complain: bool,
    pub show_bids: bool,
    pub bid_selection_enabled: bool,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailData {
    pub order: Order,
    pub view: OrderViewState,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "must contain at least one item"), nested)]
    pub order_items: Vec<OrderItem>,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    #[validate(length(min = 1, message = "is required"))]
    pub payment_method: String,
    #[schema(value_type = Option<String>)]
    pub seller_id: Option<Uuid>,
}
impl_json_from_request!(CreateOrderRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PayOrderRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub payment_result: PaymentResult,
}
impl_json_from_request!(PayOrderRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidRequest {
    #[schema(value_type = String)]
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(custom(function = "validate_non_negative_price"))]
    pub price: BigDecimal,
}
impl_json_from_request!(SubmitBidRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SelectShipperRequest {
    #[schema(value_type = String)]
    pub shipper_id: Uuid,
    #[schema(value_type = String)]
    #[serde(deserialize_with = "deserialize_price")]
    pub price: BigDecimal,
    pub justification: Option<String>,
}
impl_json_from_request!(SelectShipperRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingStatusRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub shipping_status: String,
}
impl_json_from_request!(ShippingStatusRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComplainRequest {
    #[serde(default)]
    pub clerk_warning: String,
    #[serde(default)]
    pub shipper_warning: String,
}
impl_json_from_request!(ComplainRequest);
