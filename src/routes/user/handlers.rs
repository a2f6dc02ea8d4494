use super::errors::{AuthError, UserProfileError, UserRegistrationError};
use super::schemas::{
    AddWarningRequest, AuthData, AuthenticateRequest, CreateUserAccount, UpdateHomeAddressRequest,
    UpdateProfileRequest, UserAccount, UserProfileData, UserWarning,
};
use super::utils::{
    append_user_warning, fetch_user_by_id, get_auth_data, register_user, save_home_address,
    update_user_profile as save_user_profile, validate_user_credentials,
};
use super::views::get_profile_view_state;
use crate::configuration::{SecretSetting, UserSettings};
use crate::errors::GenericError;
use crate::schemas::GenericResponse;
use actix_web::web;
use chrono::Utc;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/user/authenticate",
    tag = "User",
    request_body(content = AuthenticateRequest, description = "Request Body"),
    responses(
        (status=200, description= "Authenticate User", body= GenericResponse<AuthData>),
        (status=400, description= "Invalid email or password", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Authenticate User", skip(pool, body, secret), fields(email = %body.email, user_id = tracing::field::Empty))]
pub async fn authenticate(
    body: AuthenticateRequest,
    pool: web::Data<PgPool>,
    secret: web::Data<SecretSetting>,
) -> Result<web::Json<GenericResponse<AuthData>>, AuthError> {
    let user = validate_user_credentials(body, &pool).await?;
    tracing::Span::current().record("user_id", tracing::field::display(&user.id));
    let auth_obj = get_auth_data(user, &secret.jwt)?;
    Ok(web::Json(GenericResponse::success(
        "Successfully Authenticated User",
        Some(auth_obj),
    )))
}

#[utoipa::path(
    post,
    path = "/user/register",
    tag = "User",
    request_body(content = CreateUserAccount, description = "Request Body"),
    responses(
        (status=200, description= "Account created successfully", body= GenericResponse<TupleUnit>),
        (status=400, description= "Invalid request or duplicate email", body= GenericResponse<TupleUnit>),
        (status=403, description= "Admin registration not permitted", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    err,
    name = "User Account Registration API",
    skip(pool, body, user_settings),
    fields(email = %body.email, user_id = tracing::field::Empty)
)]
pub async fn register_user_account(
    body: CreateUserAccount,
    pool: web::Data<PgPool>,
    user_settings: web::Data<UserSettings>,
) -> Result<web::Json<GenericResponse<()>>, UserRegistrationError> {
    let email = body.email.to_lowercase();
    if body.is_admin
        && !user_settings
            .admin_list
            .iter()
            .any(|admin| admin.to_lowercase() == email)
    {
        return Err(UserRegistrationError::InsufficientPrivilegeError(
            "Insufficient privilege to register Admin".to_string(),
        ));
    }
    let user_id = register_user(&pool, &body).await?;
    tracing::Span::current().record("user_id", tracing::field::display(&user_id));
    Ok(web::Json(GenericResponse::success(
        "Successfully Registered User",
        Some(()),
    )))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "User",
    description = "Profile of the caller, or of any account when the caller is an admin.",
    params(
        ("user_id" = String, Path, description = "User account id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "User profile", body= GenericResponse<UserProfileData>),
        (status=403, description= "Not permitted", body= GenericResponse<TupleUnit>),
        (status=410, description= "Account not found", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Fetch User Profile", skip(pool, user), fields(caller_id = %user.id))]
pub async fn fetch_user_profile(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<UserProfileData>>, GenericError> {
    let user_id = path.into_inner();
    let account = if user_id == user.id {
        user
    } else if user.is_admin {
        fetch_user_by_id(&pool, user_id)
            .await
            .map_err(|e| {
                GenericError::DatabaseError("Something went wrong while fetching user".to_string(), e)
            })?
            .ok_or_else(|| GenericError::DataNotFound("User account not found".to_string()))?
    } else {
        return Err(GenericError::InsufficientPrivilegeError(
            "Not allowed to view this profile".to_string(),
        ));
    };
    let view = get_profile_view_state(&account);
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched user profile",
        Some(UserProfileData {
            user: account,
            view,
        }),
    )))
}

#[utoipa::path(
    put,
    path = "/user/profile",
    tag = "User",
    request_body(content = UpdateProfileRequest, description = "Request Body"),
    params(
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Updated profile", body= GenericResponse<UserProfileData>),
        (status=400, description= "Invalid request or password mismatch", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Update User Profile", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn update_user_profile(
    body: UpdateProfileRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<UserProfileData>>, GenericError> {
    save_user_profile(&pool, &user, &body).await?;
    let account = fetch_user_by_id(&pool, user.id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError("Something went wrong while fetching user".to_string(), e)
        })?
        .ok_or_else(|| GenericError::DataNotFound("User account not found".to_string()))?;
    let view = get_profile_view_state(&account);
    Ok(web::Json(GenericResponse::success(
        "Profile Updated Successfully",
        Some(UserProfileData {
            user: account,
            view,
        }),
    )))
}

#[utoipa::path(
    put,
    path = "/user/profile/address",
    tag = "User",
    request_body(content = UpdateHomeAddressRequest, description = "Request Body"),
    params(
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Home address saved", body= GenericResponse<TupleUnit>),
        (status=403, description= "Account type has no home address", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Update Home Address", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn update_home_address(
    body: UpdateHomeAddressRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    if !get_profile_view_state(&user).show_home_address_section {
        return Err(UserProfileError::InsufficientPrivilegeError(
            "Home address is only kept for buyer accounts".to_string(),
        )
        .into());
    }
    save_home_address(&pool, user.id, &body.address)
        .await
        .map_err(|e| {
            GenericError::DatabaseError(
                "Something went wrong while saving home address".to_string(),
                e,
            )
        })?;
    Ok(web::Json(GenericResponse::success(
        "Home Address Saved Successfully",
        Some(()),
    )))
}

#[utoipa::path(
    post,
    path = "/user/{user_id}/warning",
    tag = "User",
    request_body(content = AddWarningRequest, description = "Request Body"),
    params(
        ("user_id" = String, Path, description = "User account id"),
        ("Authorization" = String, Header, description = "JWT token"),
    ),
    responses(
        (status=200, description= "Warning recorded", body= GenericResponse<TupleUnit>),
        (status=403, description= "Admin only", body= GenericResponse<TupleUnit>),
        (status=410, description= "Account not found", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(err, name = "Add User Warning", skip(pool, body, user), fields(admin_id = %user.id))]
pub async fn add_user_warning(
    path: web::Path<Uuid>,
    body: AddWarningRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    if !user.is_admin {
        return Err(GenericError::InsufficientPrivilegeError(
            "Only admins can warn users".to_string(),
        ));
    }
    let warning = UserWarning {
        reason: body.reason,
        description: body.description,
        created_on: Utc::now(),
    };
    let updated = append_user_warning(&pool, path.into_inner(), &warning)
        .await
        .map_err(|e| {
            GenericError::DatabaseError("Something went wrong while saving warning".to_string(), e)
        })?;
    if !updated {
        return Err(GenericError::DataNotFound(
            "User account not found".to_string(),
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Warning Added Successfully",
        Some(()),
    )))
}
