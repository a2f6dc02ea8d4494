use crate::errors::GenericError;
use crate::impl_json_from_request;
use actix_web::{FromRequest, HttpMessage};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    pub name: String,
    pub logo: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HomeAddress {
    #[validate(length(min = 1, message = "is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "is required"))]
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWarning {
    pub reason: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_seller: bool,
    pub is_shipper: bool,
    pub seller: Option<SellerProfile>,
    pub home_address: Option<HomeAddress>,
    pub warnings: Vec<UserWarning>,
    pub created_on: DateTime<Utc>,
}

impl UserAccount {
    pub fn can_manage_bids(&self) -> bool {
        self.is_seller || self.is_admin
    }
}

impl FromRequest for UserAccount {
    type Error = GenericError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let value = req.extensions().get::<UserAccount>().cloned();

        let result = match value {
            Some(user) => Ok(user),
            None => Err(GenericError::UnexpectedCustomError(
                "Something went wrong while parsing user account detail".to_string(),
            )),
        };

        ready(result)
    }
}

fn validate_password_length(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < 6 {
        let mut error = ValidationError::new("password_length");
        error.message = Some("must be at least 6 characters".into());
        return Err(error);
    }
    Ok(())
}

/// Empty means "keep the stored password".
fn validate_new_password_length(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().is_empty() {
        return Ok(());
    }
    validate_password_length(password)
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserAccount {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(email(message = "is not a valid email"))]
    pub email: String,
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_password_length"))]
    pub password: SecretString,
    #[serde(default)]
    pub is_seller: bool,
    #[serde(default)]
    pub is_shipper: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub seller: Option<SellerProfile>,
}
impl_json_from_request!(CreateUserAccount);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    #[validate(email(message = "is not a valid email"))]
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}
impl_json_from_request!(AuthenticateRequest);

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub user: UserAccount,
    #[serde(serialize_with = "secret_serialize")]
    #[schema(value_type = String)]
    pub token: SecretString,
}

fn secret_serialize<S>(x: &SecretString, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(x.expose_secret())
}

/// Profile form submission. Seller fields are only applied to seller
/// accounts; an empty password leaves the stored one unchanged.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(email(message = "is not a valid email"))]
    pub email: String,
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_new_password_length"))]
    pub password: Option<SecretString>,
    #[schema(value_type = Option<String>)]
    pub confirm_password: Option<SecretString>,
    pub seller_name: Option<String>,
    pub seller_logo: Option<String>,
    pub seller_description: Option<String>,
}
impl_json_from_request!(UpdateProfileRequest);

impl UpdateProfileRequest {
    /// Password to store, if the caller supplied a non-empty one.
    pub fn new_password(&self) -> Option<&SecretString> {
        self.password
            .as_ref()
            .filter(|password| !password.expose_secret().is_empty())
    }
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeAddressRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub address: HomeAddress,
}
impl_json_from_request!(UpdateHomeAddressRequest);

#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWarningRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub reason: String,
    #[serde(default)]
    pub description: String,
}
impl_json_from_request!(AddWarningRequest);

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewState {
    pub show_seller_section: bool,
    pub show_home_address_section: bool,
    pub warnings: Vec<UserWarning>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileData {
    pub user: UserAccount,
    pub view: ProfileViewState,
}
