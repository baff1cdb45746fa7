use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::error::{PayrollError, PayrollResult};
use crate::model::audit::AuditTable;
use crate::model::period::{AttendancePeriod, NewAttendancePeriod};
use crate::model::timestamp_now;
use crate::repository::{Database, PeriodStore, UnitOfWork};
use crate::service::Actor;
use crate::service::audit::{AuditRecorder, Mutation};

/// Creates and looks up attendance periods. Periods are never updated once
/// created.
#[derive(Clone)]
pub struct PeriodRegistry {
    db: Arc<dyn Database>,
    audit: AuditRecorder,
}

impl PeriodRegistry {
    pub fn new(db: Arc<dyn Database>, audit: AuditRecorder) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self), fields(user_id = actor.user_id, request_id = actor.request_id))]
    pub async fn create_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        actor: Actor,
    ) -> PayrollResult<u64> {
        if start_date >= end_date {
            return Err(PayrollError::Validation(
                "start_date must be before end_date".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let new_period = NewAttendancePeriod {
            start_date,
            end_date,
            created_at: timestamp_now(),
        };
        let id = tx.insert_period(&new_period).await?;
        let period = new_period.persisted(id);

        self.audit
            .record_mutation(
                tx.as_mut(),
                Mutation::created(AuditTable::AttendancePeriods, id, &period, actor)?,
            )
            .await?;
        tx.commit().await?;

        info!(period_id = id, "attendance period created");
        Ok(id)
    }

    pub async fn get_period(&self, id: u64) -> PayrollResult<Option<AttendancePeriod>> {
        let mut tx = self.db.begin().await?;
        Ok(tx.get_period(id).await?)
    }
}
