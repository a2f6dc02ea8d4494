use super::schemas::PaymentWidgetConfig;
use crate::configuration::PaymentSettings;
use crate::constants::DUMMY_PAYPAL_CLIENT_ID;
use crate::schemas::GenericResponse;
use actix_web::{web, HttpResponse, Responder};

#[utoipa::path(
    get,
    path = "/util/health_check",
    tag = "Util",
    responses(
        (status=200, description= "Service is up"),
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("Running Server")
}

#[utoipa::path(
    get,
    path = "/util/config/paypal",
    tag = "Util",
    description = "Client identifier the browser uses to load the payment widget.",
    responses(
        (status=200, description= "Payment widget configuration", body= GenericResponse<PaymentWidgetConfig>),
    )
)]
#[tracing::instrument(name = "Fetch payment widget config", skip(payment_setting))]
pub async fn paypal_client_id(
    payment_setting: web::Data<PaymentSettings>,
) -> web::Json<GenericResponse<PaymentWidgetConfig>> {
    let client_id = if payment_setting.paypal_client_id.trim().is_empty() {
        DUMMY_PAYPAL_CLIENT_ID
    } else {
        payment_setting.paypal_client_id.as_str()
    };
    web::Json(GenericResponse::success(
        "Successfully fetched payment widget config",
        Some(PaymentWidgetConfig::paypal(client_id)),
    ))
}
