use super::errors::{AuthError, UserProfileError, UserRegistrationError};
use super::models::UserAccountModel;
use super::schemas::{
    AuthData, AuthenticateRequest, CreateUserAccount, HomeAddress, SellerProfile,
    UpdateProfileRequest, UserAccount, UserWarning,
};
use crate::configuration::Jwt;
use crate::utils::{generate_jwt_token_for_user, spawn_blocking_with_tracing};
use anyhow::{anyhow, Context};
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use chrono::Utc;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const USER_ACCOUNT_COLUMNS: &str = r#"id, name, email, password, is_admin, is_seller, is_shipper,
    seller, home_address, warnings, created_on, updated_on"#;

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[tracing::instrument(
    name = "Validate credentials",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: SecretString,
    password_candidate: SecretString,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .map_err(|e| anyhow!("Failed to parse hash in PHC string format: {}", e))?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|e| AuthError::InvalidCredentials(anyhow!("Invalid password: {}", e)))
}

fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("Invalid salt: {}", e))?;
    let params = Params::new(15000, 2, 1, None).map_err(|e| anyhow!("Invalid params: {}", e))?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(SecretString::from(password_hash))
}

#[tracing::instrument(name = "Hash password", skip(password))]
pub async fn hash_password(password: &SecretString) -> Result<SecretString, anyhow::Error> {
    let password = SecretString::from(password.expose_secret().to_string());
    spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn blocking task.")?
}

#[tracing::instrument(name = "Fetch user by id", skip(pool))]
pub async fn fetch_user_by_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserAccount>, anyhow::Error> {
    let query = format!(
        "SELECT {} FROM user_account WHERE id = $1",
        USER_ACCOUNT_COLUMNS
    );
    let row = sqlx::query_as::<_, UserAccountModel>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching user account")
        })?;
    Ok(row.map(UserAccountModel::into_schema))
}

#[tracing::instrument(name = "Fetch user by email", skip(pool))]
async fn fetch_user_model_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserAccountModel>, anyhow::Error> {
    let query = format!(
        "SELECT {} FROM user_account WHERE lower(email) = lower($1)",
        USER_ACCOUNT_COLUMNS
    );
    let row = sqlx::query_as::<_, UserAccountModel>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching user account")
        })?;
    Ok(row)
}

#[tracing::instrument(name = "Validate user credentials", skip(credentials, pool), fields(email = %credentials.email))]
pub async fn validate_user_credentials(
    credentials: AuthenticateRequest,
    pool: &PgPool,
) -> Result<UserAccount, AuthError> {
    // Unknown emails still pay for a hash verification.
    let mut expected_password_hash = SecretString::from(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    );
    let user_model = fetch_user_model_by_email(pool, &credentials.email)
        .await
        .map_err(|e| {
            AuthError::DatabaseError("Something went wrong while fetching user".to_string(), e)
        })?;
    if let Some(model) = &user_model {
        expected_password_hash = SecretString::from(model.password.clone());
    }
    let password = credentials.password;
    spawn_blocking_with_tracing(move || verify_password_hash(expected_password_hash, password))
        .await
        .context("Failed to spawn blocking task.")??;

    user_model
        .map(UserAccountModel::into_schema)
        .ok_or_else(|| AuthError::InvalidCredentials(anyhow!("Unknown email")))
}

#[tracing::instrument(name = "Get auth data", skip(user, jwt), fields(user_id = %user.id))]
pub fn get_auth_data(user: UserAccount, jwt: &Jwt) -> Result<AuthData, anyhow::Error> {
    let token = generate_jwt_token_for_user(user.id, jwt.expiry, &jwt.secret)?;
    Ok(AuthData { user, token })
}

#[tracing::instrument(name = "Register user", skip(pool, user_account), fields(email = %user_account.email))]
pub async fn register_user(
    pool: &PgPool,
    user_account: &CreateUserAccount,
) -> Result<Uuid, UserRegistrationError> {
    let password_hash = hash_password(&user_account.password).await?;
    let user_id = Uuid::new_v4();
    let seller = if user_account.is_seller {
        user_account.seller.clone().map(Json)
    } else {
        None
    };
    let query = sqlx::query(
        r#"
        INSERT INTO user_account (id, name, email, password, is_admin, is_seller, is_shipper,
            seller, home_address, warnings, created_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, '[]'::jsonb, $9)
        "#,
    )
    .bind(user_id)
    .bind(&user_account.name)
    .bind(user_account.email.to_lowercase())
    .bind(password_hash.expose_secret())
    .bind(user_account.is_admin)
    .bind(user_account.is_seller)
    .bind(user_account.is_shipper)
    .bind(seller)
    .bind(Utc::now());

    query.execute(pool).await.map_err(|e| {
        if is_unique_violation(&e) {
            return UserRegistrationError::DuplicateEmail(anyhow::Error::new(e));
        }
        tracing::error!("Failed to execute query: {:?}", e);
        UserRegistrationError::DatabaseError(
            "Something went wrong while registering user".to_string(),
            anyhow::Error::new(e),
        )
    })?;
    Ok(user_id)
}

/// Password and confirmation must match; both default to empty.
pub fn validate_profile_update(body: &UpdateProfileRequest) -> Result<(), UserProfileError> {
    let password = body
        .password
        .as_ref()
        .map(|p| p.expose_secret())
        .unwrap_or_default();
    let confirm_password = body
        .confirm_password
        .as_ref()
        .map(|p| p.expose_secret())
        .unwrap_or_default();
    if password != confirm_password {
        return Err(UserProfileError::ValidationError(
            "Password and Confirm Password Are Not Matched".to_string(),
        ));
    }
    Ok(())
}

/// Seller profile to persist for this update, merged over the stored one.
/// `None` for non-seller accounts.
pub fn build_seller_profile(
    user: &UserAccount,
    body: &UpdateProfileRequest,
) -> Option<SellerProfile> {
    if !user.is_seller {
        return None;
    }
    let current = user.seller.clone().unwrap_or(SellerProfile {
        name: String::new(),
        logo: String::new(),
        description: String::new(),
    });
    Some(SellerProfile {
        name: body.seller_name.clone().unwrap_or(current.name),
        logo: body.seller_logo.clone().unwrap_or(current.logo),
        description: body
            .seller_description
            .clone()
            .unwrap_or(current.description),
    })
}

#[tracing::instrument(name = "Update user profile", skip(pool, body, user), fields(user_id = %user.id))]
pub async fn update_user_profile(
    pool: &PgPool,
    user: &UserAccount,
    body: &UpdateProfileRequest,
) -> Result<(), UserProfileError> {
    validate_profile_update(body)?;
    let password_hash = match body.new_password() {
        Some(password) => Some(hash_password(password).await?),
        None => None,
    };
    let seller = build_seller_profile(user, body).map(Json);
    let query = sqlx::query(
        r#"
        UPDATE user_account SET name = $2, email = $3,
            password = COALESCE($4, password),
            seller = COALESCE($5, seller),
            updated_on = $6
        WHERE id = $1
        "#,
    )
    .bind(user.id)
    .bind(&body.name)
    .bind(body.email.to_lowercase())
    .bind(password_hash.as_ref().map(|p| p.expose_secret().to_string()))
    .bind(seller)
    .bind(Utc::now());

    query.execute(pool).await.map_err(|e| {
        if is_unique_violation(&e) {
            return UserProfileError::DuplicateEmail(anyhow::Error::new(e));
        }
        tracing::error!("Failed to execute query: {:?}", e);
        UserProfileError::DatabaseError(
            "Something went wrong while updating user profile".to_string(),
            anyhow::Error::new(e),
        )
    })?;
    Ok(())
}

#[tracing::instrument(name = "Update home address", skip(pool, address))]
pub async fn save_home_address(
    pool: &PgPool,
    user_id: Uuid,
    address: &HomeAddress,
) -> Result<(), anyhow::Error> {
    sqlx::query(
        r#"
        UPDATE user_account SET home_address = $2, updated_on = $3
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(Json(address))
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while saving home address")
    })?;
    Ok(())
}

#[tracing::instrument(name = "Append user warning", skip(pool, warning))]
pub async fn append_user_warning(
    pool: &PgPool,
    user_id: Uuid,
    warning: &UserWarning,
) -> Result<bool, anyhow::Error> {
    let result = sqlx::query(
        r#"
        UPDATE user_account SET warnings = warnings || $2, updated_on = $3
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(Json(vec![warning]))
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while saving user warning")
    })?;
    Ok(result.rows_affected() > 0)
}

