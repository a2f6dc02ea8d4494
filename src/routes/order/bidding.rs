use super::errors::OrderError;
use super::schemas::{Order, SelectShipperRequest, ShipperBid};

/// True when some bid from a different shipper is strictly cheaper than
/// `selected`. Ties never require a justification.
pub fn requires_justification(bids: &[ShipperBid], selected: &ShipperBid) -> bool {
    bids.iter()
        .filter(|bid| bid.shipper_id != selected.shipper_id)
        .any(|bid| bid.price < selected.price)
}

/// Inserts the bid, or replaces the price when the shipper already bid.
pub fn apply_bid(bids: &mut Vec<ShipperBid>, bid: ShipperBid) {
    match bids.iter_mut().find(|b| b.shipper_id == bid.shipper_id) {
        Some(existing) => {
            existing.price = bid.price;
            existing.shipper_name = bid.shipper_name;
        }
        None => bids.push(bid),
    }
}

/// Checks a shipper selection against the order and returns the trimmed
/// justification to store alongside it.
pub fn validate_bid_selection(
    order: &Order,
    request: &SelectShipperRequest,
) -> Result<Option<String>, OrderError> {
    if order.shipper_id.is_some() {
        return Err(OrderError::ValidationError(
            "A shipper is already selected for this order".to_string(),
        ));
    }
    let selected = order
        .shipper_bids
        .iter()
        .find(|bid| bid.shipper_id == request.shipper_id)
        .ok_or_else(|| {
            OrderError::ValidationError("Selected shipper has no bid on this order".to_string())
        })?;
    if selected.price != request.price {
        return Err(OrderError::ValidationError(
            "Selected price does not match the shipper's bid".to_string(),
        ));
    }

    let justification = request
        .justification
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);
    if justification.is_none() && requires_justification(&order.shipper_bids, selected) {
        return Err(OrderError::ValidationError(
            "Please justify why a cheaper bid was not selected".to_string(),
        ));
    }
    Ok(justification)
}
