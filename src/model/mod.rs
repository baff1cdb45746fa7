pub mod attendance;
pub mod audit;
pub mod overtime;
pub mod payslip;
pub mod period;
pub mod reimbursement;
pub mod role;
pub mod user;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision MySQL `DATETIME(6)` keeps, so an audited
/// snapshot compares equal to the row read back later.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
