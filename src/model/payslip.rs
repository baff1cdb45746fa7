use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payslip {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = 3)]
    pub period_id: u64,
    #[schema(example = 3000000)]
    pub base_salary: i64,
    #[schema(example = 10)]
    pub working_days: i64,
    #[schema(example = 8)]
    pub present_days: i64,
    #[schema(example = 2400000)]
    pub attendance_amount: i64,
    #[schema(example = 6)]
    pub overtime_hours: i64,
    #[schema(example = 1800000)]
    pub overtime_amount: i64,
    #[schema(example = 100000)]
    pub reimbursement_total: i64,
    #[schema(example = 4300000)]
    pub take_home_pay: i64,
    #[schema(example = "2026-01-31T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(example = "2026-01-31T00:00:00Z", format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
}

/// A computed payslip that has not been written yet. Payroll runs insert
/// these in bulk and audit them as a single array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayslip {
    pub user_id: u64,
    pub period_id: u64,
    pub base_salary: i64,
    pub working_days: i64,
    pub present_days: i64,
    pub attendance_amount: i64,
    pub overtime_hours: i64,
    pub overtime_amount: i64,
    pub reimbursement_total: i64,
    pub take_home_pay: i64,
    pub created_at: DateTime<Utc>,
}

impl NewPayslip {
    pub fn persisted(self, id: u64) -> Payslip {
        Payslip {
            id,
            user_id: self.user_id,
            period_id: self.period_id,
            base_salary: self.base_salary,
            working_days: self.working_days,
            present_days: self.present_days,
            attendance_amount: self.attendance_amount,
            overtime_hours: self.overtime_hours,
            overtime_amount: self.overtime_amount,
            reimbursement_total: self.reimbursement_total,
            take_home_pay: self.take_home_pay,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayslipSummary {
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = 4300000)]
    pub total_take_home: i64,
}

/// Recomputed on every query, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PayslipSummaryReport {
    pub per_user: Vec<PayslipSummary>,
    #[schema(example = 4300000)]
    pub total: i64,
}
