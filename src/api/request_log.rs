use actix_web::body::BoxBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::web::Data;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures::future::{Ready, ready};
use tracing::{debug, error};

use crate::api::response::ApiError;
use crate::api::state::AppState;
use crate::config::Config;
use crate::utils::deadline::with_deadline;

/// Id of the request log written for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub u64);

impl FromRequest for RequestId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<RequestId>()
                .copied()
                .ok_or_else(|| ApiError::Internal.into()),
        )
    }
}

/// Records every non-GET request before it reaches the handler, under the
/// request deadline. A request that cannot be logged is rejected with 500,
/// or 504 when the write runs out of time.
pub async fn request_log_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    if req.method() == Method::GET {
        return next.call(req).await;
    }

    let state = req
        .app_data::<Data<AppState>>()
        .cloned()
        .ok_or(ApiError::Internal)?;
    let config = req
        .app_data::<Data<Config>>()
        .cloned()
        .ok_or(ApiError::Internal)?;

    let url = req.uri().to_string();
    let method = req.method().to_string();
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    let recorded = with_deadline(
        config.request_timeout,
        state.audit.record_request(&url, &method, &ip),
    )
    .await;

    match recorded {
        Ok(id) => {
            debug!(request_id = id, %url, %method, "request logged");
            req.extensions_mut().insert(RequestId(id));
            next.call(req).await
        }
        Err(e) => {
            error!(error = %e, %url, "failed to record request log");
            let response = ApiError::from(e).error_response();
            Ok(req.into_response(response))
        }
    }
}
