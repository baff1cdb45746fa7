use crate::api::response::ApiError;
use crate::auth::auth::{AuthUser, bearer_token};
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

/// Verifies the bearer token and stores the caller as an [`AuthUser`] in
/// the request extensions. Rejections use the standard envelope.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .cloned()
        .ok_or(ApiError::Internal)?;

    let authenticated = {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());
        bearer_token(header).and_then(|token| {
            verify_token(token, &config.jwt_secret)
                .map_err(|e| {
                    debug!(error = %e, "token rejected");
                    ApiError::Unauthorized("invalid token".to_string())
                })
                .and_then(AuthUser::try_from)
        })
    };

    match authenticated {
        Ok(auth_user) => {
            req.extensions_mut().insert(auth_user);
            next.call(req).await
        }
        Err(e) => Ok(req.into_response(e.error_response())),
    }
}
