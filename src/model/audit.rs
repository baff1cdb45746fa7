use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

/// Tables whose mutations are written to the audit ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditTable {
    AttendancePeriods,
    Attendances,
    Overtimes,
    Reimbursements,
    Payslips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
}

/// `record_id` used for entries that describe a whole payroll run rather
/// than a single row.
pub const RUN_LEVEL_RECORD_ID: u64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: u64,
    pub table_name: AuditTable,
    pub record_id: u64,
    pub action: AuditAction,
    pub old_data: Value,
    pub new_data: Value,
    pub changed_by: Option<u64>,
    pub request_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    pub table_name: AuditTable,
    pub record_id: u64,
    pub action: AuditAction,
    pub old_data: Value,
    pub new_data: Value,
    pub changed_by: Option<u64>,
    pub request_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl NewAuditLog {
    pub fn persisted(self, id: u64) -> AuditLog {
        AuditLog {
            id,
            table_name: self.table_name,
            record_id: self.record_id,
            action: self.action,
            old_data: self.old_data,
            new_data: self.new_data,
            changed_by: self.changed_by,
            request_id: self.request_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequestLog {
    pub id: u64,
    pub url: String,
    pub method: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRequestLog {
    pub url: String,
    pub method: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

impl NewRequestLog {
    pub fn persisted(self, id: u64) -> RequestLog {
        RequestLog {
            id,
            url: self.url,
            method: self.method,
            ip_address: self.ip_address,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn table_names_match_schema() {
        assert_eq!(AuditTable::AttendancePeriods.as_ref(), "attendance_periods");
        assert_eq!(AuditTable::Attendances.as_ref(), "attendances");
        assert_eq!(AuditTable::Overtimes.as_ref(), "overtimes");
        assert_eq!(AuditTable::Reimbursements.as_ref(), "reimbursements");
        assert_eq!(AuditTable::Payslips.as_ref(), "payslips");
    }

    #[test]
    fn action_parses_from_stored_value() {
        assert_eq!(AuditAction::from_str("CREATE").unwrap(), AuditAction::Create);
        assert_eq!(AuditAction::Create.to_string(), "CREATE");
    }
}
