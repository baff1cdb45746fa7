use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendancePeriod {
    pub id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Stored but not consulted when running payroll.
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendancePeriod {
    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Every calendar day in the period counts, weekends included.
    pub fn working_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone)]
pub struct NewAttendancePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl NewAttendancePeriod {
    pub fn persisted(self, id: u64) -> AttendancePeriod {
        AttendancePeriod {
            id,
            start_date: self.start_date,
            end_date: self.end_date,
            is_processed: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
