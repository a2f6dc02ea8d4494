use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWidgetConfig {
    pub client_id: String,
    pub sdk_url: String,
}

impl PaymentWidgetConfig {
    pub fn paypal(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            sdk_url: format!("https://www.paypal.com/sdk/js?client-id={}", client_id),
        }
    }
}
