//! Persistence contracts consumed by the payroll core.
//!
//! All reads and writes go through a [`UnitOfWork`] obtained from
//! [`Database::begin`]. A unit of work is one storage transaction: nothing it
//! wrote is visible to others until [`UnitOfWork::commit`], and dropping it
//! uncommitted discards every write.

#[cfg(test)]
pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::{Attendance, EmployeeAttendanceSummary, NewAttendance};
use crate::model::audit::{NewAuditLog, NewRequestLog};
use crate::model::overtime::{NewOvertime, Overtime};
use crate::model::payslip::{NewPayslip, Payslip, PayslipSummaryReport};
use crate::model::period::{AttendancePeriod, NewAttendancePeriod};
use crate::model::reimbursement::NewReimbursement;
use crate::model::user::User;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with a unique key.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(error)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Database: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>>;

    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait UnitOfWork:
    PeriodStore
    + AttendanceStore
    + OvertimeStore
    + ReimbursementStore
    + PayslipStore
    + AuditLedger
    + UserStore
{
    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
pub trait PeriodStore: Send {
    async fn insert_period(&mut self, period: &NewAttendancePeriod) -> StoreResult<u64>;

    async fn get_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>>;

    /// Same as [`PeriodStore::get_period`] but holds a write lock on the row
    /// until the unit of work ends.
    async fn lock_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>>;
}

#[async_trait]
pub trait AttendanceStore: Send {
    async fn insert_attendance(&mut self, attendance: &NewAttendance) -> StoreResult<u64>;

    async fn get_attendance(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>>;

    /// One row per non-admin user ordered by user id, including users with no
    /// activity in the period.
    async fn employee_attendance_summary(
        &mut self,
        period_id: u64,
    ) -> StoreResult<Vec<EmployeeAttendanceSummary>>;
}

#[async_trait]
pub trait OvertimeStore: Send {
    async fn insert_overtime(&mut self, overtime: &NewOvertime) -> StoreResult<u64>;

    async fn get_overtime(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Overtime>>;
}

#[async_trait]
pub trait ReimbursementStore: Send {
    async fn insert_reimbursement(&mut self, reimbursement: &NewReimbursement)
    -> StoreResult<u64>;
}

#[async_trait]
pub trait PayslipStore: Send {
    async fn payslips_exist_for_period(&mut self, period_id: u64) -> StoreResult<bool>;

    /// Returns the number of rows written; an empty slice writes nothing.
    async fn bulk_insert_payslips(&mut self, payslips: &[NewPayslip]) -> StoreResult<u64>;

    async fn payslips_by_user(&mut self, user_id: u64) -> StoreResult<Vec<Payslip>>;

    async fn payslip_summary(&mut self, period_id: u64) -> StoreResult<PayslipSummaryReport>;
}

#[async_trait]
pub trait AuditLedger: Send {
    async fn insert_request_log(&mut self, log: &NewRequestLog) -> StoreResult<u64>;

    async fn insert_audit_log(&mut self, log: &NewAuditLog) -> StoreResult<u64>;
}

#[async_trait]
pub trait UserStore: Send {
    async fn get_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>>;
}
