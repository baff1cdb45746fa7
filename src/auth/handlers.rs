use crate::{
    api::{
        response::{ApiError, ErrorEnvelope, ok},
        state::AppState,
    },
    auth::{jwt::generate_access_token, password::verify_password},
    config::Config,
    model::role::Role,
    models::{LoginReqDto, LoginResponse},
    repository::UserStore,
};
use actix_web::{Responder, web};
use tracing::{debug, error, info, instrument};

#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope)
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(state, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    state: web::Data<AppState>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(ApiError::BadRequest("invalid input".to_string()));
    }

    debug!("Fetching user from database");

    let mut tx = state.db.begin().await.map_err(|e| {
        error!(error = %e, "Database error while fetching user");
        ApiError::Internal
    })?;
    let db_user = match tx.get_user_by_username(&user.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return Err(invalid_credentials());
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return Err(ApiError::Internal);
        }
    };
    drop(tx);

    if let Err(e) = verify_password(&user.password, &db_user.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(
        db_user.id,
        db_user.username.clone(),
        Role::from_is_admin(db_user.is_admin),
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign access token");
        ApiError::Internal
    })?;

    info!(user_id = db_user.id, "Login successful");

    Ok(ok(LoginResponse { token }))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("invalid credentials".to_string())
}
