use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{
    Complaint, Order, OrderItem, PaymentResult, PriceBreakdown, ShipperBid, ShippingAddress,
};

#[allow(dead_code)]
#[derive(Debug, FromRow)]
pub struct OrderModel {
    pub id: Uuid,
    pub order_items: Json<Vec<OrderItem>>,
    pub shipper_bids: Json<Vec<ShipperBid>>,
    pub shipping_address: Json<ShippingAddress>,
    pub payment_method: String,
    pub payment_result: Option<Json<PaymentResult>>,
    pub items_price: BigDecimal,
    pub shipping_price: BigDecimal,
    pub tax_price: BigDecimal,
    pub total_price: BigDecimal,
    pub shipping_status: Option<String>,
    pub select_shipper_justification: Option<String>,
    pub buyer_id: Uuid,
    pub seller_id: Option<Uuid>,
    pub shipper_id: Option<Uuid>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub complain: Option<Json<Complaint>>,
    pub tracking_no: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl OrderModel {
    pub fn into_schema(self) -> Order {
        Order {
            id: self.id,
            order_items: self.order_items.0,
            shipping_address: self.shipping_address.0,
            payment_method: self.payment_method,
            payment_result: self.payment_result.map(|result| result.0),
            prices: PriceBreakdown {
                items_price: self.items_price,
                shipping_price: self.shipping_price,
                tax_price: self.tax_price,
                total_price: self.total_price,
            },
            shipping_status: self.shipping_status,
            select_shipper_justification: self.select_shipper_justification,
            buyer_id: self.buyer_id,
            seller_id: self.seller_id,
            shipper_id: self.shipper_id,
            shipper_bids: self.shipper_bids.0,
            is_paid: self.is_paid,
            paid_at: self.paid_at,
            is_delivered: self.is_delivered,
            delivered_at: self.delivered_at,
            complain: self.complain.map(|complain| complain.0),
            tracking_no: self.tracking_no,
            created_on: self.created_on,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OrderBidsModel {
    pub shipper_bids: Json<Vec<ShipperBid>>,
    pub shipper_id: Option<Uuid>,
}
