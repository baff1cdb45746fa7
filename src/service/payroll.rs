use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::model::attendance::EmployeeAttendanceSummary;
use crate::model::audit::{AuditTable, RUN_LEVEL_RECORD_ID};
use crate::model::payslip::NewPayslip;
use crate::model::timestamp_now;
use crate::repository::{AttendanceStore, Database, PayslipStore, PeriodStore, UnitOfWork};
use crate::service::audit::{AuditRecorder, Mutation};
use crate::service::{Actor, conflict_as};

/// Computes one payslip per non-admin employee for a period. A period is
/// paid at most once.
#[derive(Clone)]
pub struct PayrollCalculator {
    db: Arc<dyn Database>,
    audit: AuditRecorder,
}

impl PayrollCalculator {
    pub fn new(db: Arc<dyn Database>, audit: AuditRecorder) -> Self {
        Self { db, audit }
    }

    /// Generates, stores and audits the payslips for `period_id` and returns
    /// how many were written.
    ///
    /// The period row is locked before the existence check, so a concurrent
    /// run for the same period waits and then sees this run's payslips. The
    /// unique key on `(user_id, period_id)` backs this up.
    #[instrument(skip(self), fields(user_id = actor.user_id, request_id = actor.request_id))]
    pub async fn run_payroll(&self, period_id: u64, actor: Actor) -> PayrollResult<usize> {
        let mut tx = self.db.begin().await?;

        let period = tx.lock_period(period_id).await?;

        if tx.payslips_exist_for_period(period_id).await? {
            warn!(period_id, "payroll already generated for period");
            return Err(PayrollError::AlreadyProcessed { period_id });
        }

        let period = period.ok_or(PayrollError::NotFound("period"))?;
        let working_days = period.working_days();
        if working_days <= 0 {
            return Err(PayrollError::Validation(
                "period has no working days".to_string(),
            ));
        }

        let summaries = tx.employee_attendance_summary(period_id).await?;
        let created_at = timestamp_now();
        let payslips = summaries
            .iter()
            .map(|summary| compute_payslip(summary, period_id, working_days, created_at))
            .collect::<PayrollResult<Vec<NewPayslip>>>()?;

        tx.bulk_insert_payslips(&payslips)
            .await
            .map_err(|e| conflict_as(e, PayrollError::AlreadyProcessed { period_id }))?;

        self.audit
            .record_mutation(
                tx.as_mut(),
                Mutation::created(AuditTable::Payslips, RUN_LEVEL_RECORD_ID, &payslips, actor)?,
            )
            .await?;
        tx.commit().await?;

        info!(period_id, working_days, payslips = payslips.len(), "payroll completed");
        Ok(payslips.len())
    }
}

/// Pro-rates the base salary by present days and by overtime hours over the
/// period's working days, truncating each amount, then adds reimbursements.
/// `working_days` must be positive. Amounts that do not fit in an `i64` are
/// rejected.
pub fn compute_payslip(
    summary: &EmployeeAttendanceSummary,
    period_id: u64,
    working_days: i64,
    created_at: DateTime<Utc>,
) -> PayrollResult<NewPayslip> {
    let overflow = || {
        PayrollError::Validation(format!(
            "payslip amount out of range for employee {}",
            summary.user_id
        ))
    };
    let attendance_amount = summary
        .present_days
        .checked_mul(summary.base_salary)
        .ok_or_else(overflow)?
        / working_days;
    let overtime_amount = summary
        .overtime_hours
        .checked_mul(summary.base_salary)
        .ok_or_else(overflow)?
        / working_days;
    let take_home_pay = attendance_amount
        .checked_add(overtime_amount)
        .and_then(|pay| pay.checked_add(summary.reimbursement_total))
        .ok_or_else(overflow)?;

    Ok(NewPayslip {
        user_id: summary.user_id,
        period_id,
        base_salary: summary.base_salary,
        working_days,
        present_days: summary.present_days,
        attendance_amount,
        overtime_hours: summary.overtime_hours,
        overtime_amount,
        reimbursement_total: summary.reimbursement_total,
        take_home_pay,
        created_at,
    })
}
