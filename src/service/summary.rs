use std::sync::Arc;

use tracing::instrument;

use crate::error::PayrollResult;
use crate::model::payslip::{Payslip, PayslipSummaryReport};
use crate::repository::{Database, PayslipStore};

/// Read-only views over persisted payslips.
#[derive(Clone)]
pub struct SummaryReporter {
    db: Arc<dyn Database>,
}

impl SummaryReporter {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Per-employee take-home totals and the grand total for a period. A
    /// period without payslips yields an empty report.
    #[instrument(skip(self))]
    pub async fn get_summary(&self, period_id: u64) -> PayrollResult<PayslipSummaryReport> {
        let mut tx = self.db.begin().await?;
        Ok(tx.payslip_summary(period_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_employee(&self, user_id: u64) -> PayrollResult<Vec<Payslip>> {
        let mut tx = self.db.begin().await?;
        Ok(tx.payslips_by_user(user_id).await?)
    }
}
