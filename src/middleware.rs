use crate::configuration::SecretSetting;
use crate::constants::BEARER_PATTERN;
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::routes::user::utils::fetch_user_by_id;
use crate::utils::{bytes_to_payload, decode_token, get_header_value};
use actix_web::body::{self, BoxBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http, web, Error, HttpMessage};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;
use tracing::instrument;

// Middleware for saving the request and response into the tracing
pub struct ReadReqResMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S> Service<ServiceRequest> for ReadReqResMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    #[instrument(skip(self), name = "Request Response Payload", fields(path = %req.path()))]
    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let is_non_json_req_res =
            req.path().contains("/docs/") || req.path().contains("/api-docs/");
        if is_non_json_req_res {
            Box::pin(async move {
                let fut = svc.call(req).await?;
                Ok(fut)
            })
        } else {
            Box::pin(async move {
                let request_str: String = req.extract::<String>().await?;
                tracing::info!({%request_str}, "HTTP Request");
                req.set_payload(bytes_to_payload(web::Bytes::from(request_str)));
                let fut = svc.call(req).await?;

                let (req, res) = fut.into_parts();
                let (res, body) = res.into_parts();
                let body_bytes = body::to_bytes(body).await.map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!(
                        "Failed to read response body: {}",
                        e
                    ))
                })?;
                let response_str = match std::str::from_utf8(&body_bytes) {
                    Ok(s) => s.to_string(),
                    Err(_) => {
                        tracing::error!("Error decoding response body");
                        String::from("")
                    }
                };
                tracing::info!({%response_str}, "HTTP Response");
                let res = res.set_body(BoxBody::new(response_str));
                Ok(ServiceResponse::new(req, res))
            })
        }
    }
}

pub struct SaveRequestResponse;

impl<S> Transform<S, ServiceRequest> for SaveRequestResponse
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ReadReqResMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ReadReqResMiddleware {
            service: Rc::new(RefCell::new(service)),
        }))
    }
}

fn get_request_token(req: &ServiceRequest) -> Option<String> {
    req.cookie("token")
        .map(|c| c.value().to_string())
        .or_else(|| {
            get_header_value(req, http::header::AUTHORIZATION.as_str()).and_then(|header| {
                BEARER_PATTERN
                    .captures(&header)
                    .and_then(|captures| captures.get(1))
                    .map(|token| token.as_str().to_string())
            })
        })
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match get_request_token(&req) {
            Some(token) => token,
            None => {
                let (request, _pl) = req.into_parts();
                let json_error =
                    GenericError::InvalidJWT("Authorization token is missing".to_string());
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };

        let secret = req.app_data::<web::Data<SecretSetting>>().cloned();
        let user_id = match secret {
            Some(secret) => decode_token(token, &secret.jwt.secret),
            None => {
                let (request, _pl) = req.into_parts();
                let json_error =
                    GenericError::UnexpectedCustomError("JWT secret is not configured".to_string());
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };
        let user_id = match user_id {
            Ok(id) => id,
            Err(e) => {
                let (request, _pl) = req.into_parts();
                let json_error = GenericError::InvalidJWT(e.to_string());
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };

        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            let db_pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| {
                    GenericError::UnexpectedCustomError(
                        "Database pool is not configured".to_string(),
                    )
                })?
                .clone();
            let user = fetch_user_by_id(&db_pool, user_id)
                .await
                .map_err(|e| {
                    GenericError::DatabaseError(
                        "Something went wrong while fetching user account".to_string(),
                        e,
                    )
                })?
                .ok_or_else(|| GenericError::InvalidJWT("User account doesn't exist".to_string()))?;

            req.extensions_mut().insert::<UserAccount>(user);

            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

/// Middleware factory for requiring authentication.
pub struct RequireAuth;

impl<S> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
        }))
    }
}
