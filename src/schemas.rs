use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericResponse<D> {
    pub status: bool,
    pub customer_message: String,
    pub code: String,
    pub data: Option<D>,
}

impl<D> GenericResponse<D> {
    pub fn success(message: &str, data: Option<D>) -> Self {
        Self {
            status: true,
            customer_message: String::from(message),
            code: String::from("200"),
            data,
        }
    }

    pub fn error(message: &str, code: &str, data: Option<D>) -> Self {
        Self {
            status: false,
            customer_message: String::from(message),
            code: String::from(code),
            data,
        }
    }
}

/// Outcome of one asynchronous operation as seen by a client: a request is
/// in flight, it failed with a single message, or it produced a value.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    Loading,
    Failed(String),
    Succeeded(T),
}

impl<T> RequestState<T> {
    pub fn from_response(response: GenericResponse<T>) -> Self {
        match (response.status, response.data) {
            (true, Some(data)) => RequestState::Succeeded(data),
            (true, None) => RequestState::Failed("Response carried no data".to_string()),
            (false, _) => RequestState::Failed(response.customer_message),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JWTClaims {
    #[schema(value_type = String)]
    pub sub: uuid::Uuid,
    pub exp: usize,
}

/// JSON body extractor mapping parse and validation failures to
/// `GenericError::ValidationError`.
#[macro_export]
macro_rules! impl_json_from_request {
    ($struct_name:ident) => {
        impl actix_web::FromRequest for $struct_name {
            type Error = $crate::errors::GenericError;
            type Future = futures_util::future::LocalBoxFuture<'static, Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                payload: &mut actix_http::Payload,
            ) -> Self::Future {
                let fut = <actix_web::web::Json<Self> as actix_web::FromRequest>::from_request(req, payload);

                Box::pin(async move {
                    let body = fut
                        .await
                        .map_err(|e| $crate::errors::GenericError::ValidationError(e.to_string()))?
                        .into_inner();
                    validator::Validate::validate(&body).map_err(|e| {
                        $crate::errors::GenericError::ValidationError(
                            $crate::utils::validation_errors_message(&e),
                        )
                    })?;
                    Ok(body)
                })
            }
        }
    };
}
