use actix_web::{Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::parse_date;
use crate::api::request_log::RequestId;
use crate::api::response::{ApiError, ErrorEnvelope, ok};
use crate::api::state::AppState;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::model::payslip::Payslip;
use crate::utils::deadline::with_deadline;

#[derive(Deserialize, ToSchema)]
pub struct SubmitAttendance {
    #[schema(example = 1)]
    pub period_id: u64,
    #[schema(example = "2025-06-02", format = "date")]
    pub date: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SubmitOvertime {
    #[schema(example = 1)]
    pub period_id: u64,
    #[schema(example = "2025-06-02", format = "date")]
    pub date: String,
    #[schema(example = 2, minimum = 1, maximum = 3)]
    pub hours: i32,
    #[schema(example = true)]
    pub work_completed: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct SubmitReimbursement {
    #[schema(example = 1)]
    pub period_id: u64,
    #[schema(example = 150000)]
    pub amount: i64,
    #[schema(example = "Taxi to client site")]
    pub description: String,
}

#[derive(Serialize, ToSchema)]
pub struct Submitted {
    #[schema(example = 12)]
    pub id: u64,
    #[schema(example = "attendance submitted")]
    pub message: String,
}

impl Submitted {
    fn new(id: u64, message: &str) -> Self {
        Self {
            id,
            message: message.to_string(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/employee/submit-attendance",
    request_body = SubmitAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = Submitted),
        (status = 400, description = "Date outside the period", body = ErrorEnvelope),
        (status = 404, description = "Period not found", body = ErrorEnvelope),
        (status = 409, description = "Attendance already submitted", body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn submit_attendance(
    auth: AuthUser,
    request_id: RequestId,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<SubmitAttendance>,
) -> Result<impl Responder, ApiError> {
    auth.require_employee()?;

    let date = parse_date(&payload.date, "date")?;
    let id = with_deadline(
        config.request_timeout,
        state
            .submissions
            .submit_attendance(auth.actor(request_id), payload.period_id, date),
    )
    .await?;

    Ok(ok(Submitted::new(id, "attendance submitted")))
}

#[utoipa::path(
    post,
    path = "/v1/employee/submit-overtime",
    request_body = SubmitOvertime,
    responses(
        (status = 200, description = "Overtime recorded", body = Submitted),
        (status = 400, description = "Work not completed, invalid hours or no attendance", body = ErrorEnvelope),
        (status = 404, description = "Period not found", body = ErrorEnvelope),
        (status = 409, description = "Overtime already submitted", body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn submit_overtime(
    auth: AuthUser,
    request_id: RequestId,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<SubmitOvertime>,
) -> Result<impl Responder, ApiError> {
    auth.require_employee()?;

    let date = parse_date(&payload.date, "date")?;
    if !payload.work_completed {
        return Err(ApiError::BadRequest(
            "you must finish your work before submitting overtime".to_string(),
        ));
    }

    let id = with_deadline(
        config.request_timeout,
        state.submissions.submit_overtime(
            auth.actor(request_id),
            payload.period_id,
            date,
            payload.hours,
        ),
    )
    .await?;

    Ok(ok(Submitted::new(id, "overtime submitted")))
}

#[utoipa::path(
    post,
    path = "/v1/employee/submit-reimbursement",
    request_body = SubmitReimbursement,
    responses(
        (status = 200, description = "Reimbursement recorded", body = Submitted),
        (status = 400, description = "Amount not positive", body = ErrorEnvelope),
        (status = 404, description = "Period not found", body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn submit_reimbursement(
    auth: AuthUser,
    request_id: RequestId,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<SubmitReimbursement>,
) -> Result<impl Responder, ApiError> {
    auth.require_employee()?;

    let SubmitReimbursement {
        period_id,
        amount,
        description,
    } = payload.into_inner();
    if amount <= 0 {
        return Err(ApiError::BadRequest(
            "amount must be greater than 0".to_string(),
        ));
    }

    let id = with_deadline(
        config.request_timeout,
        state.submissions.submit_reimbursement(
            auth.actor(request_id),
            period_id,
            amount,
            description,
        ),
    )
    .await?;

    Ok(ok(Submitted::new(id, "reimbursement submitted")))
}

#[utoipa::path(
    get,
    path = "/v1/employee/generate-payslips",
    responses(
        (status = 200, description = "The caller's payslips, oldest period first", body = Vec<Payslip>),
        (status = 401, body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn generate_payslips(
    auth: AuthUser,
    state: web::Data<AppState>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    auth.require_employee()?;

    let payslips = with_deadline(
        config.request_timeout,
        state.summary.get_by_employee(auth.user_id),
    )
    .await?;

    Ok(ok(payslips))
}
