use crate::api::admin::{AddAttendancePeriod, PayrollRunResult, PeriodCreated, RunPayroll};
use crate::api::employee::{SubmitAttendance, SubmitOvertime, SubmitReimbursement, Submitted};
use crate::api::ping::PingResponse;
use crate::api::response::ErrorEnvelope;
use crate::model::payslip::{Payslip, PayslipSummary, PayslipSummaryReport};
use crate::models::{LoginReqDto, LoginResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payslip API",
        version = "1.0.0",
        description = r#"
## Payslip Generation System

Attendance-based payroll with a full audit trail.

### Flow
- **Admin** opens an attendance period.
- **Employees** submit attendance, overtime and reimbursements for the period.
- **Admin** runs payroll once per period, generating one payslip per employee.
- **Admin** reads the take-home summary; employees read their own payslips.

Every successful mutation is written to the audit log together with the
request that caused it.

### Security
All admin and employee endpoints require a **JWT Bearer** token from `/v1/login`.

### Response Format
Every response is `{ "success": bool, "error": string, "data": any }`.
"#,
    ),
    paths(
        crate::api::ping::ping,
        crate::auth::handlers::login,

        crate::api::admin::add_attendance_period,
        crate::api::admin::run_payroll,
        crate::api::admin::get_payslip_summary,

        crate::api::employee::submit_attendance,
        crate::api::employee::submit_overtime,
        crate::api::employee::submit_reimbursement,
        crate::api::employee::generate_payslips
    ),
    components(
        schemas(
            PingResponse,
            LoginReqDto,
            LoginResponse,
            ErrorEnvelope,
            AddAttendancePeriod,
            PeriodCreated,
            RunPayroll,
            PayrollRunResult,
            SubmitAttendance,
            SubmitOvertime,
            SubmitReimbursement,
            Submitted,
            Payslip,
            PayslipSummary,
            PayslipSummaryReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database connectivity"),
        (name = "Auth", description = "Token issuing"),
        (name = "Admin", description = "Attendance periods, payroll runs and summaries"),
        (name = "Employee", description = "Submissions and payslips"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
