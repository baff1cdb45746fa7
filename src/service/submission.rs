use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::error::{PayrollError, PayrollResult};
use crate::model::attendance::NewAttendance;
use crate::model::audit::AuditTable;
use crate::model::overtime::{MAX_OVERTIME_HOURS, MIN_OVERTIME_HOURS, NewOvertime};
use crate::model::reimbursement::NewReimbursement;
use crate::model::timestamp_now;
use crate::repository::{
    AttendanceStore, Database, OvertimeStore, PeriodStore, ReimbursementStore, UnitOfWork,
};
use crate::service::audit::{AuditRecorder, Mutation};
use crate::service::{Actor, conflict_as};

/// Enforces the per-claim rules for attendance, overtime and reimbursement
/// submissions. The submitting employee is always `actor.user_id`.
///
/// Rules are checked in a fixed order and the first failure is returned.
/// The existence checks are an early exit only; the unique keys on
/// `(user_id, period_id, date)` decide under concurrency.
#[derive(Clone)]
pub struct SubmissionValidator {
    db: Arc<dyn Database>,
    audit: AuditRecorder,
}

impl SubmissionValidator {
    pub fn new(db: Arc<dyn Database>, audit: AuditRecorder) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self), fields(user_id = actor.user_id, request_id = actor.request_id))]
    pub async fn submit_attendance(
        &self,
        actor: Actor,
        period_id: u64,
        date: NaiveDate,
    ) -> PayrollResult<u64> {
        let mut tx = self.db.begin().await?;

        if tx
            .get_attendance(actor.user_id, period_id, date)
            .await?
            .is_some()
        {
            return Err(PayrollError::AlreadyExists("attendance"));
        }

        let period = tx
            .get_period(period_id)
            .await?
            .ok_or(PayrollError::NotFound("period"))?;

        if !period.contains(date) {
            return Err(PayrollError::OutOfWindow {
                start: period.start_date,
                end: period.end_date,
            });
        }

        let new_attendance = NewAttendance {
            user_id: actor.user_id,
            period_id,
            date,
            created_at: timestamp_now(),
        };
        let id = tx
            .insert_attendance(&new_attendance)
            .await
            .map_err(|e| conflict_as(e, PayrollError::AlreadyExists("attendance")))?;
        let attendance = new_attendance.persisted(id);

        self.audit
            .record_mutation(
                tx.as_mut(),
                Mutation::created(AuditTable::Attendances, id, &attendance, actor)?,
            )
            .await?;
        tx.commit().await?;

        info!(attendance_id = id, "attendance submitted");
        Ok(id)
    }

    /// Unlike attendance, the overtime date is not checked against the
    /// period window.
    #[instrument(skip(self), fields(user_id = actor.user_id, request_id = actor.request_id))]
    pub async fn submit_overtime(
        &self,
        actor: Actor,
        period_id: u64,
        date: NaiveDate,
        hours: i32,
    ) -> PayrollResult<u64> {
        let mut tx = self.db.begin().await?;

        if tx
            .get_attendance(actor.user_id, period_id, date)
            .await?
            .is_none()
        {
            debug!("overtime rejected, no attendance for the day");
            return Err(PayrollError::PrerequisiteMissing);
        }

        if tx
            .get_overtime(actor.user_id, period_id, date)
            .await?
            .is_some()
        {
            return Err(PayrollError::AlreadyExists("overtime"));
        }

        if tx.get_period(period_id).await?.is_none() {
            return Err(PayrollError::NotFound("period"));
        }

        if !(MIN_OVERTIME_HOURS..=MAX_OVERTIME_HOURS).contains(&hours) {
            return Err(PayrollError::Validation(format!(
                "hours must be between {MIN_OVERTIME_HOURS} and {MAX_OVERTIME_HOURS}"
            )));
        }

        let new_overtime = NewOvertime {
            user_id: actor.user_id,
            period_id,
            date,
            hours,
            created_at: timestamp_now(),
        };
        let id = tx
            .insert_overtime(&new_overtime)
            .await
            .map_err(|e| conflict_as(e, PayrollError::AlreadyExists("overtime")))?;
        let overtime = new_overtime.persisted(id);

        self.audit
            .record_mutation(
                tx.as_mut(),
                Mutation::created(AuditTable::Overtimes, id, &overtime, actor)?,
            )
            .await?;
        tx.commit().await?;

        info!(overtime_id = id, hours, "overtime submitted");
        Ok(id)
    }

    #[instrument(skip(self, description), fields(user_id = actor.user_id, request_id = actor.request_id))]
    pub async fn submit_reimbursement(
        &self,
        actor: Actor,
        period_id: u64,
        amount: i64,
        description: String,
    ) -> PayrollResult<u64> {
        let mut tx = self.db.begin().await?;

        if tx.get_period(period_id).await?.is_none() {
            return Err(PayrollError::NotFound("period"));
        }

        if amount <= 0 {
            return Err(PayrollError::Validation(
                "amount must be greater than 0".to_string(),
            ));
        }

        let new_reimbursement = NewReimbursement {
            user_id: actor.user_id,
            period_id,
            amount,
            description,
            created_at: timestamp_now(),
        };
        let id = tx.insert_reimbursement(&new_reimbursement).await?;
        let reimbursement = new_reimbursement.persisted(id);

        self.audit
            .record_mutation(
                tx.as_mut(),
                Mutation::created(AuditTable::Reimbursements, id, &reimbursement, actor)?,
            )
            .await?;
        tx.commit().await?;

        info!(reimbursement_id = id, amount, "reimbursement submitted");
        Ok(id)
    }
}
