//! The `{success, error, data}` envelope every endpoint answers with, and
//! the transport error that renders failures into it.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::error::PayrollError;

#[derive(Debug, Serialize)]
pub struct StandardResponse<T> {
    pub success: bool,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> StandardResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: String::new(),
            data: Some(data),
        }
    }
}

impl StandardResponse<()> {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            error: message,
            data: None,
        }
    }
}

/// Shorthand for a 200 with `data` in the envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(StandardResponse::ok(data))
}

/// Envelope shape as shown in the OpenAPI document.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "period not found")]
    pub error: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Payroll(#[from] PayrollError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Payroll(e) => match e {
                PayrollError::Validation(_)
                | PayrollError::OutOfWindow { .. }
                | PayrollError::PrerequisiteMissing => StatusCode::BAD_REQUEST,
                PayrollError::NotFound(_) => StatusCode::NOT_FOUND,
                PayrollError::AlreadyExists(_) | PayrollError::AlreadyProcessed { .. } => {
                    StatusCode::CONFLICT
                }
                PayrollError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                PayrollError::Store(_) | PayrollError::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            let cause = std::error::Error::source(self).map(ToString::to_string);
            error!(error = %self, cause = ?cause, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(StandardResponse::failure(message))
    }
}
