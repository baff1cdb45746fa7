//! The payroll core: audit trail, periods, submissions, payroll runs and
//! payslip reporting. Each component owns an `Arc<dyn Database>` and runs
//! every mutation together with its audit entry in one unit of work.

pub mod audit;
pub mod payroll;
pub mod period;
pub mod submission;
pub mod summary;


use crate::error::PayrollError;
use crate::repository::StoreError;

/// Who is performing a mutation and which logged request it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: u64,
    pub request_id: u64,
}

impl Actor {
    pub fn new(user_id: u64, request_id: u64) -> Self {
        Self { user_id, request_id }
    }
}

/// Reports a unique-key collision as `conflict` and anything else as a
/// store failure.
fn conflict_as(error: StoreError, conflict: PayrollError) -> PayrollError {
    match error {
        StoreError::UniqueViolation(_) => conflict,
        other => PayrollError::Store(other),
    }
}
