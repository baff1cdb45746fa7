use actix_web::{Responder, web};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::response::{ApiError, ErrorEnvelope, ok};
use crate::api::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong")]
    pub server_says: String,
}

#[utoipa::path(
    get,
    path = "/v1/ping",
    responses(
        (status = 200, description = "Database reachable", body = PingResponse),
        (status = 500, description = "Database unreachable", body = ErrorEnvelope)
    ),
    tag = "Health"
)]
pub async fn ping(state: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    state.db.ping().await.map_err(|e| {
        error!(error = %e, "database ping failed");
        ApiError::Internal
    })?;

    Ok(ok(PingResponse {
        server_says: "pong".to_string(),
    }))
}
