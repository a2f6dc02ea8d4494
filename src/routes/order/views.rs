use super::errors::OrderError;
use super::schemas::{DeliveryStatus, Order, OrderViewState, PaymentStatus};
use crate::routes::user::schemas::UserAccount;

pub fn get_payment_status(order: &Order) -> PaymentStatus {
    if order.is_paid {
        PaymentStatus::Paid { at: order.paid_at }
    } else {
        PaymentStatus::NotPaid
    }
}

pub fn get_delivery_status(order: &Order) -> DeliveryStatus {
    if order.is_delivered {
        DeliveryStatus::Delivered {
            at: order.delivered_at,
        }
    } else {
        DeliveryStatus::NotDelivered
    }
}

fn is_buyer(order: &Order, viewer: &UserAccount) -> bool {
    order.buyer_id == viewer.id
}

fn is_assigned_shipper(order: &Order, viewer: &UserAccount) -> bool {
    order.shipper_id == Some(viewer.id)
}

/// Role gating uses the viewer's flags, never anything stored on the order.
pub fn get_order_view_state(order: &Order, viewer: &UserAccount) -> OrderViewState {
    let show_complaint_form = is_buyer(order, viewer) && order.is_delivered;
    let show_bids = viewer.can_manage_bids();
    OrderViewState {
        show_payment: !order.is_paid,
        can_deliver: viewer.is_admin && order.is_paid && !order.is_delivered,
        show_complaint_form,
        complaint_read_only: order.complain.is_some(),
        can_complain: show_complaint_form && order.complain.is_none(),
        show_bids,
        bid_selection_enabled: show_bids && order.shipper_id.is_none(),
        payment_status: get_payment_status(order),
        delivery_status: get_delivery_status(order),
    }
}

pub fn can_view_order(order: &Order, viewer: &UserAccount) -> bool {
    viewer.is_admin
        || is_buyer(order, viewer)
        || order.seller_id == Some(viewer.id)
        || is_assigned_shipper(order, viewer)
        || order
            .shipper_bids
            .iter()
            .any(|bid| bid.shipper_id == viewer.id)
        || (viewer.is_shipper && order.shipper_id.is_none())
}

pub fn ensure_can_pay(order: &Order, viewer: &UserAccount) -> Result<(), OrderError> {
    if !is_buyer(order, viewer) {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only the buyer can pay for this order".to_string(),
        ));
    }
    if order.is_paid {
        return Err(OrderError::ValidationError(
            "Order is already paid".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_can_deliver(order: &Order, viewer: &UserAccount) -> Result<(), OrderError> {
    if !viewer.is_admin {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only admins can mark orders as delivered".to_string(),
        ));
    }
    if !order.is_paid {
        return Err(OrderError::ValidationError("Order is not paid yet".to_string()));
    }
    if order.is_delivered {
        return Err(OrderError::ValidationError(
            "Order is already delivered".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_can_bid(order: &Order, viewer: &UserAccount) -> Result<(), OrderError> {
    if !viewer.is_shipper {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only shippers can bid on orders".to_string(),
        ));
    }
    if order.shipper_id.is_some() {
        return Err(OrderError::ValidationError(
            "A shipper is already selected for this order".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_can_select_shipper(order: &Order, viewer: &UserAccount) -> Result<(), OrderError> {
    let view = get_order_view_state(order, viewer);
    if !view.show_bids {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only sellers and admins can select a shipper".to_string(),
        ));
    }
    if !viewer.is_admin && order.seller_id != Some(viewer.id) {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only the seller of this order can select its shipper".to_string(),
        ));
    }
    if !view.bid_selection_enabled {
        return Err(OrderError::ValidationError(
            "A shipper is already selected for this order".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_can_update_shipping_status(
    order: &Order,
    viewer: &UserAccount,
) -> Result<(), OrderError> {
    if !viewer.is_admin && !is_assigned_shipper(order, viewer) {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only the assigned shipper or an admin can update shipping status".to_string(),
        ));
    }
    if order.is_delivered {
        return Err(OrderError::ValidationError(
            "Order is already delivered".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_can_complain(order: &Order, viewer: &UserAccount) -> Result<(), OrderError> {
    if !is_buyer(order, viewer) {
        return Err(OrderError::InsufficientPrivilegeError(
            "Only the buyer can complain about this order".to_string(),
        ));
    }
    let view = get_order_view_state(order, viewer);
    if !view.show_complaint_form {
        return Err(OrderError::ValidationError(
            "Complaints can only be filed after delivery".to_string(),
        ));
    }
    if !view.can_complain {
        return Err(OrderError::ValidationError(
            "A complaint was already filed for this order".to_string(),
        ));
    }
    Ok(())
}

/// A seller named on a new order must be an existing seller account.
pub fn ensure_valid_seller(seller: Option<&UserAccount>) -> Result<(), OrderError> {
    match seller {
        Some(account) if account.is_seller => Ok(()),
        _ => Err(OrderError::ValidationError(
            "Seller does not exist".to_string(),
        )),
    }
}
