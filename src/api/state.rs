use std::sync::Arc;

use crate::repository::Database;
use crate::service::audit::AuditRecorder;
use crate::service::payroll::PayrollCalculator;
use crate::service::period::PeriodRegistry;
use crate::service::submission::SubmissionValidator;
use crate::service::summary::SummaryReporter;

/// Shared by all workers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub audit: AuditRecorder,
    pub periods: PeriodRegistry,
    pub submissions: SubmissionValidator,
    pub payroll: PayrollCalculator,
    pub summary: SummaryReporter,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>) -> Self {
        let audit = AuditRecorder::new(db.clone());
        Self {
            periods: PeriodRegistry::new(db.clone(), audit.clone()),
            submissions: SubmissionValidator::new(db.clone(), audit.clone()),
            payroll: PayrollCalculator::new(db.clone(), audit.clone()),
            summary: SummaryReporter::new(db.clone()),
            audit,
            db,
        }
    }
}
