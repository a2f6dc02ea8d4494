use crate::helpers::spawn_app;
use marketplace_order_service::routes::util::schemas::PaymentWidgetConfig;
use marketplace_order_service::schemas::{GenericResponse, RequestState};

#[actix_web::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get("/util/health_check", None).await;

    assert!(response.status().is_success());
    assert_eq!(Some(14), response.content_length());
}

#[actix_web::test]
async fn paypal_client_id_is_served() {
    let app = spawn_app().await;

    let response = app.get("/util/config/paypal", None).await;

    assert!(response.status().is_success());
    let body: GenericResponse<PaymentWidgetConfig> =
        response.json().await.expect("Failed to parse response");
    let state = RequestState::from_response(body);
    match state {
        RequestState::Succeeded(config) => {
            assert_eq!(config.client_id, "sb");
            assert!(config.sdk_url.ends_with("client-id=sb"));
        }
        other => panic!("Unexpected state {:?}", other),
    }
}
