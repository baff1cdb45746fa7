use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_OVERTIME_HOURS: i32 = 1;
pub const MAX_OVERTIME_HOURS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Overtime {
    pub id: u64,
    pub user_id: u64,
    pub period_id: u64,
    pub date: NaiveDate,
    pub hours: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOvertime {
    pub user_id: u64,
    pub period_id: u64,
    pub date: NaiveDate,
    pub hours: i32,
    pub created_at: DateTime<Utc>,
}

impl NewOvertime {
    pub fn persisted(self, id: u64) -> Overtime {
        Overtime {
            id,
            user_id: self.user_id,
            period_id: self.period_id,
            date: self.date,
            hours: self.hours,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
