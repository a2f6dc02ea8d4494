use crate::errors::GenericError;
use crate::schemas::GenericResponse;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            AuthError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            AuthError::InvalidCredentials(_) => "Invalid email or password".to_string(),
            AuthError::UnexpectedError(inner_error) => inner_error.to_string(),
            AuthError::DatabaseError(message, _err) => message.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}

#[derive(thiserror::Error)]
pub enum UserRegistrationError {
    #[error("Email is already registered")]
    DuplicateEmail(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error("{0}")]
    InsufficientPrivilegeError(String),
}

impl std::fmt::Debug for UserRegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UserRegistrationError {
    fn status_code(&self) -> StatusCode {
        match self {
            UserRegistrationError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            UserRegistrationError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UserRegistrationError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            UserRegistrationError::InsufficientPrivilegeError(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            UserRegistrationError::DuplicateEmail(_) => "Email is already registered".to_string(),
            UserRegistrationError::UnexpectedError(inner_error) => inner_error.to_string(),
            UserRegistrationError::DatabaseError(error_msg, _err) => error_msg.clone(),
            UserRegistrationError::InsufficientPrivilegeError(error_msg) => error_msg.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}

#[allow(clippy::enum_variant_names)]
#[derive(thiserror::Error)]
pub enum UserProfileError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    InsufficientPrivilegeError(String),
    #[error("Email is already registered")]
    DuplicateEmail(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for UserProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<UserProfileError> for GenericError {
    fn from(err: UserProfileError) -> GenericError {
        match err {
            UserProfileError::ValidationError(message) => GenericError::ValidationError(message),
            UserProfileError::InsufficientPrivilegeError(message) => {
                GenericError::InsufficientPrivilegeError(message)
            }
            UserProfileError::DuplicateEmail(_) => {
                GenericError::ValidationError("Email is already registered".to_string())
            }
            UserProfileError::UnexpectedError(error) => GenericError::UnexpectedError(error),
            UserProfileError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
