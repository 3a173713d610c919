// Centralized error handling for the dashboard

use crate::models::api::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Rejected store operations. None of these is fatal and none leaves a
/// partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Lead not found: {0}")]
    LeadNotFound(u32),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No active user named '{0}'")]
    UnknownUser(String),

    #[error("Lead {0} is already unlocked")]
    AlreadyUnlocked(u32),

    #[error("Not enough credits! Required {required}, available {available}")]
    InsufficientCredits { required: u32, available: u32 },

    #[error("You cannot change your own role.")]
    SelfRoleChange,

    #[error("Cannot assign leads to removed user {0}")]
    UserRemoved(String),
}

/// Errors returned by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Login required")]
    NotAuthenticated,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(e) => match e {
                StoreError::LeadNotFound(_) | StoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::UnknownUser(_) => StatusCode::UNAUTHORIZED,
                StoreError::AlreadyUnlocked(_) => StatusCode::CONFLICT,
                StoreError::InsufficientCredits { .. } => StatusCode::PAYMENT_REQUIRED,
                StoreError::SelfRoleChange => StatusCode::FORBIDDEN,
                StoreError::UserRemoved(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
