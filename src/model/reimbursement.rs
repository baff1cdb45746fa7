use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reimbursement {
    pub id: u64,
    pub user_id: u64,
    pub period_id: u64,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReimbursement {
    pub user_id: u64,
    pub period_id: u64,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewReimbursement {
    pub fn persisted(self, id: u64) -> Reimbursement {
        Reimbursement {
            id,
            user_id: self.user_id,
            period_id: self.period_id,
            amount: self.amount,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
