//! Error taxonomy for the payroll core.
//!
//! Every core operation returns [`PayrollResult`]. The `Display` text of each
//! variant is what callers see, so none of them carry storage detail; the
//! underlying cause of a [`PayrollError::Store`] stays reachable through
//! [`std::error::Error::source`] for logging.

use chrono::NaiveDate;
use thiserror::Error;

use crate::repository::StoreError;

#[derive(Debug, Error)]
pub enum PayrollError {
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A submission date falls outside its period.
    #[error("date must be between {start} and {end}")]
    OutOfWindow { start: NaiveDate, end: NaiveDate },

    /// A submission with the same unique key was already recorded.
    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    /// Overtime was submitted before attendance for the same day.
    #[error("you need to submit attendance first before submitting overtime")]
    PrerequisiteMissing,

    /// Payslips already exist for the period.
    #[error("payroll already generated")]
    AlreadyProcessed { period_id: u64 },

    #[error("storage failure")]
    Store(#[from] StoreError),

    #[error("failed to serialize audit snapshot")]
    Serialization(#[from] serde_json::Error),

    #[error("request deadline exceeded")]
    Timeout,
}

pub type PayrollResult<T> = Result<T, PayrollError>;
