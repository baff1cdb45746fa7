pub mod admin;
pub mod employee;
pub mod ping;
pub mod request_log;
pub mod response;
pub mod state;


use actix_web::web;
use chrono::NaiveDate;

use crate::api::response::ApiError;

/// Parses a `YYYY-MM-DD` body field; `field` names it in the error.
fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid input {field}")))
}

/// Malformed JSON bodies answer with the standard envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|_, _| ApiError::BadRequest("invalid input".to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_, _| ApiError::BadRequest("invalid path parameter".to_string()).into())
}
