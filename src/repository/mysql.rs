use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};

use crate::model::attendance::{Attendance, EmployeeAttendanceSummary, NewAttendance};
use crate::model::audit::{NewAuditLog, NewRequestLog};
use crate::model::overtime::{NewOvertime, Overtime};
use crate::model::payslip::{NewPayslip, Payslip, PayslipSummary, PayslipSummaryReport};
use crate::model::period::{AttendancePeriod, NewAttendancePeriod};
use crate::model::reimbursement::NewReimbursement;
use crate::model::user::User;
use crate::repository::{
    AttendanceStore, AuditLedger, Database, OvertimeStore, PayslipStore, PeriodStore,
    ReimbursementStore, StoreResult, UnitOfWork, UserStore,
};

/// Keeps a multi-row insert well under MySQL's 65535 placeholder limit.
const PAYSLIP_INSERT_CHUNK: usize = 1000;

#[derive(Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlUnitOfWork { tx }))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct MySqlUnitOfWork {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl PeriodStore for MySqlUnitOfWork {
    async fn insert_period(&mut self, period: &NewAttendancePeriod) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_periods (start_date, end_date, is_processed, created_at, updated_at)
            VALUES (?, ?, FALSE, ?, ?)
            "#,
        )
        .bind(period.start_date)
        .bind(period.end_date)
        .bind(period.created_at)
        .bind(period.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn get_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>> {
        let period = sqlx::query_as::<_, AttendancePeriod>(
            r#"
            SELECT id, start_date, end_date, is_processed, created_at, updated_at
            FROM attendance_periods
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(period)
    }

    async fn lock_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>> {
        let period = sqlx::query_as::<_, AttendancePeriod>(
            r#"
            SELECT id, start_date, end_date, is_processed, created_at, updated_at
            FROM attendance_periods
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(period)
    }
}

#[async_trait]
impl AttendanceStore for MySqlUnitOfWork {
    async fn insert_attendance(&mut self, attendance: &NewAttendance) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendances (user_id, period_id, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(attendance.user_id)
        .bind(attendance.period_id)
        .bind(attendance.date)
        .bind(attendance.created_at)
        .bind(attendance.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn get_attendance(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, user_id, period_id, date, created_at, updated_at
            FROM attendances
            WHERE user_id = ? AND period_id = ? AND date = ?
            "#,
        )
        .bind(user_id)
        .bind(period_id)
        .bind(date)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(attendance)
    }

    async fn employee_attendance_summary(
        &mut self,
        period_id: u64,
    ) -> StoreResult<Vec<EmployeeAttendanceSummary>> {
        // MySQL returns DECIMAL for SUM over integers; cast back to BIGINT.
        let rows = sqlx::query_as::<_, EmployeeAttendanceSummary>(
            r#"
            WITH attendance_count AS (
                SELECT user_id, COUNT(*) AS present_days
                FROM attendances
                WHERE period_id = ?
                GROUP BY user_id
            ),
            overtime_sum AS (
                SELECT user_id, SUM(hours) AS overtime_hours
                FROM overtimes
                WHERE period_id = ?
                GROUP BY user_id
            ),
            reimbursement_sum AS (
                SELECT user_id, SUM(amount) AS reimbursement_total
                FROM reimbursements
                WHERE period_id = ?
                GROUP BY user_id
            )
            SELECT
                u.id AS user_id,
                u.salary AS base_salary,
                CAST(COALESCE(a.present_days, 0) AS SIGNED) AS present_days,
                CAST(COALESCE(o.overtime_hours, 0) AS SIGNED) AS overtime_hours,
                CAST(COALESCE(r.reimbursement_total, 0) AS SIGNED) AS reimbursement_total
            FROM users u
            LEFT JOIN attendance_count a ON a.user_id = u.id
            LEFT JOIN overtime_sum o ON o.user_id = u.id
            LEFT JOIN reimbursement_sum r ON r.user_id = u.id
            WHERE u.is_admin = FALSE
            ORDER BY u.id
            "#,
        )
        .bind(period_id)
        .bind(period_id)
        .bind(period_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl OvertimeStore for MySqlUnitOfWork {
    async fn insert_overtime(&mut self, overtime: &NewOvertime) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO overtimes (user_id, period_id, date, hours, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(overtime.user_id)
        .bind(overtime.period_id)
        .bind(overtime.date)
        .bind(overtime.hours)
        .bind(overtime.created_at)
        .bind(overtime.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn get_overtime(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Overtime>> {
        let overtime = sqlx::query_as::<_, Overtime>(
            r#"
            SELECT id, user_id, period_id, date, hours, created_at, updated_at
            FROM overtimes
            WHERE user_id = ? AND period_id = ? AND date = ?
            "#,
        )
        .bind(user_id)
        .bind(period_id)
        .bind(date)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(overtime)
    }
}

#[async_trait]
impl ReimbursementStore for MySqlUnitOfWork {
    async fn insert_reimbursement(
        &mut self,
        reimbursement: &NewReimbursement,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO reimbursements (user_id, period_id, amount, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reimbursement.user_id)
        .bind(reimbursement.period_id)
        .bind(reimbursement.amount)
        .bind(&reimbursement.description)
        .bind(reimbursement.created_at)
        .bind(reimbursement.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }
}

#[async_trait]
impl PayslipStore for MySqlUnitOfWork {
    async fn payslips_exist_for_period(&mut self, period_id: u64) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM payslips WHERE period_id = ?)",
        )
        .bind(period_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists != 0)
    }

    async fn bulk_insert_payslips(&mut self, payslips: &[NewPayslip]) -> StoreResult<u64> {
        let mut written = 0;

        for chunk in payslips.chunks(PAYSLIP_INSERT_CHUNK) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO payslips (user_id, period_id, base_salary, working_days, \
                 present_days, attendance_amount, overtime_hours, overtime_amount, \
                 reimbursement_total, take_home_pay, created_at, updated_at) ",
            );
            builder.push_values(chunk, |mut row, p| {
                row.push_bind(p.user_id)
                    .push_bind(p.period_id)
                    .push_bind(p.base_salary)
                    .push_bind(p.working_days)
                    .push_bind(p.present_days)
                    .push_bind(p.attendance_amount)
                    .push_bind(p.overtime_hours)
                    .push_bind(p.overtime_amount)
                    .push_bind(p.reimbursement_total)
                    .push_bind(p.take_home_pay)
                    .push_bind(p.created_at)
                    .push_bind(p.created_at);
            });

            let result = builder.build().execute(&mut *self.tx).await?;
            written += result.rows_affected();
        }

        Ok(written)
    }

    async fn payslips_by_user(&mut self, user_id: u64) -> StoreResult<Vec<Payslip>> {
        let payslips = sqlx::query_as::<_, Payslip>(
            r#"
            SELECT id, user_id, period_id, base_salary, working_days, present_days,
                   attendance_amount, overtime_hours, overtime_amount,
                   reimbursement_total, take_home_pay, created_at, updated_at
            FROM payslips
            WHERE user_id = ?
            ORDER BY period_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(payslips)
    }

    async fn payslip_summary(&mut self, period_id: u64) -> StoreResult<PayslipSummaryReport> {
        let per_user = sqlx::query_as::<_, PayslipSummary>(
            r#"
            SELECT user_id, CAST(SUM(take_home_pay) AS SIGNED) AS total_take_home
            FROM payslips
            WHERE period_id = ?
            GROUP BY user_id
            ORDER BY user_id
            "#,
        )
        .bind(period_id)
        .fetch_all(&mut *self.tx)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(COALESCE(SUM(take_home_pay), 0) AS SIGNED)
            FROM payslips
            WHERE period_id = ?
            "#,
        )
        .bind(period_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(PayslipSummaryReport { per_user, total })
    }
}

#[async_trait]
impl AuditLedger for MySqlUnitOfWork {
    async fn insert_request_log(&mut self, log: &NewRequestLog) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO request_logs (url, method, ip_address, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&log.url)
        .bind(&log.method)
        .bind(&log.ip_address)
        .bind(log.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn insert_audit_log(&mut self, log: &NewAuditLog) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_logs
            (table_name, record_id, action, old_data, new_data, changed_by, request_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.table_name.as_ref())
        .bind(log.record_id)
        .bind(log.action.as_ref())
        .bind(Json(&log.old_data))
        .bind(Json(&log.new_data))
        .bind(log.changed_by)
        .bind(log.request_id)
        .bind(log.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.last_insert_id())
    }
}

#[async_trait]
impl UserStore for MySqlUnitOfWork {
    async fn get_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, salary, is_admin, created_at, updated_at
            FROM users
            WHERE username = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(user)
    }
}
