use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: u64,
    pub user_id: u64,
    pub period_id: u64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub user_id: u64,
    pub period_id: u64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl NewAttendance {
    pub fn persisted(self, id: u64) -> Attendance {
        Attendance {
            id,
            user_id: self.user_id,
            period_id: self.period_id,
            date: self.date,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Per-employee facts for one period, aggregated by the attendance store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EmployeeAttendanceSummary {
    pub user_id: u64,
    pub base_salary: i64,
    pub present_days: i64,
    pub overtime_hours: i64,
    pub reimbursement_total: i64,
}
