use lazy_static::lazy_static;
use regex::Regex;

pub const DUMMY_PAYPAL_CLIENT_ID: &str = "sb";
/// Items subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 100;
pub const FLAT_SHIPPING_PRICE: i64 = 10;
/// Tax rate in percent applied to the items subtotal.
pub const TAX_RATE_PERCENT: i64 = 15;

lazy_static! {
    pub static ref BEARER_PATTERN: Regex =
        Regex::new(r"^Bearer\s+(\S+)\s*$").expect("Failed to compile regex pattern");
}
