use actix_web::{Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::parse_date;
use crate::api::request_log::RequestId;
use crate::api::response::{ApiError, ErrorEnvelope, ok};
use crate::api::state::AppState;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::model::payslip::PayslipSummaryReport;
use crate::utils::deadline::with_deadline;

#[derive(Deserialize, ToSchema)]
pub struct AddAttendancePeriod {
    #[schema(example = "2025-06-01", format = "date")]
    pub start_date: String,
    #[schema(example = "2025-06-30", format = "date")]
    pub end_date: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RunPayroll {
    #[schema(example = 1)]
    pub period_id: u64,
}

#[derive(Serialize, ToSchema)]
pub struct PeriodCreated {
    #[schema(example = 1)]
    pub period_id: u64,
    #[schema(example = "attendance period created")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollRunResult {
    #[schema(example = 1)]
    pub period_id: u64,
    #[schema(example = 100)]
    pub payslips_generated: usize,
}

#[utoipa::path(
    post,
    path = "/v1/admin/add-attendance-period",
    request_body = AddAttendancePeriod,
    responses(
        (status = 200, description = "Period created", body = PeriodCreated),
        (status = 400, description = "Invalid dates", body = ErrorEnvelope),
        (status = 401, body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_attendance_period(
    auth: AuthUser,
    request_id: RequestId,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<AddAttendancePeriod>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let start_date = parse_date(&payload.start_date, "start_date")?;
    let end_date = parse_date(&payload.end_date, "end_date")?;

    let period_id = with_deadline(
        config.request_timeout,
        state
            .periods
            .create_period(start_date, end_date, auth.actor(request_id)),
    )
    .await?;

    Ok(ok(PeriodCreated {
        period_id,
        message: "attendance period created".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/admin/run-payroll",
    request_body = RunPayroll,
    responses(
        (status = 200, description = "Payslips generated", body = PayrollRunResult),
        (status = 404, description = "Period not found", body = ErrorEnvelope),
        (status = 409, description = "Payroll already generated", body = ErrorEnvelope),
        (status = 401, body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn run_payroll(
    auth: AuthUser,
    request_id: RequestId,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<RunPayroll>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let period_id = payload.period_id;
    let payslips_generated = with_deadline(
        config.request_timeout,
        state.payroll.run_payroll(period_id, auth.actor(request_id)),
    )
    .await?;

    Ok(ok(PayrollRunResult {
        period_id,
        payslips_generated,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/admin/get-payslip-summary/{period_id}",
    params(
        ("period_id" = u64, Path, description = "Attendance period ID")
    ),
    responses(
        (status = 200, description = "Take-home totals per employee", body = PayslipSummaryReport),
        (status = 401, body = ErrorEnvelope),
        (status = 403, body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_payslip_summary(
    auth: AuthUser,
    state: web::Data<AppState>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let report = with_deadline(
        config.request_timeout,
        state.summary.get_summary(path.into_inner()),
    )
    .await?;

    Ok(ok(report))
}
