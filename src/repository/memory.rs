//! In-memory [`Database`] used by the service and handler tests.
//!
//! A unit of work holds the store lock from `begin` until it is committed or
//! dropped and operates on a private copy of the state, so transactions are
//! fully serialized and an uncommitted unit of work leaves no trace. Inserts
//! enforce the same unique keys as the MySQL schema.
//!
//! Existence lookups can be made to miss rows that are stored, which is the
//! view a racing transaction gets before the other one commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::attendance::{Attendance, EmployeeAttendanceSummary, NewAttendance};
use crate::model::audit::{AuditLog, AuditTable, NewAuditLog, NewRequestLog, RequestLog};
use crate::model::overtime::{NewOvertime, Overtime};
use crate::model::payslip::{NewPayslip, Payslip, PayslipSummary, PayslipSummaryReport};
use crate::model::period::{AttendancePeriod, NewAttendancePeriod};
use crate::model::reimbursement::{NewReimbursement, Reimbursement};
use crate::model::user::User;
use crate::repository::{
    AttendanceStore, AuditLedger, Database, OvertimeStore, PayslipStore, PeriodStore,
    ReimbursementStore, StoreError, StoreResult, UnitOfWork, UserStore,
};

#[derive(Debug, Clone, Default)]
pub struct State {
    pub users: Vec<User>,
    pub periods: Vec<AttendancePeriod>,
    pub attendances: Vec<Attendance>,
    pub overtimes: Vec<Overtime>,
    pub reimbursements: Vec<Reimbursement>,
    pub payslips: Vec<Payslip>,
    pub request_logs: Vec<RequestLog>,
    pub audit_logs: Vec<AuditLog>,
    last_id: u64,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<State>>,
    fail_audit_writes: Arc<AtomicBool>,
    fail_request_log_writes: Arc<AtomicBool>,
    hidden: Arc<Mutex<Vec<AuditTable>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent audit-log insert fail.
    pub fn fail_audit_writes(&self) {
        self.fail_audit_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_request_log_writes(&self) {
        self.fail_request_log_writes.store(true, Ordering::SeqCst);
    }

    /// Makes existence lookups on `table` report nothing from now on while
    /// inserts still see every stored row.
    pub async fn hide_existing_rows(&self, table: AuditTable) {
        self.hidden.lock().await.push(table);
    }

    pub async fn add_user(&self, username: &str, salary: i64, is_admin: bool) -> u64 {
        self.add_user_with_password(username, "unused", salary, is_admin)
            .await
    }

    pub async fn add_user_with_password(
        &self,
        username: &str,
        password_hash: &str,
        salary: i64,
        is_admin: bool,
    ) -> u64 {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        let now = Utc::now();
        state.users.push(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            full_name: username.to_string(),
            salary,
            is_admin,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub async fn snapshot(&self) -> State {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let hidden = self.hidden.lock().await.clone();
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            guard,
            working,
            hidden,
            fail_audit_writes: self.fail_audit_writes.load(Ordering::SeqCst),
            fail_request_log_writes: self.fail_request_log_writes.load(Ordering::SeqCst),
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

pub struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<State>,
    working: State,
    hidden: Vec<AuditTable>,
    fail_audit_writes: bool,
    fail_request_log_writes: bool,
}

impl InMemoryUnitOfWork {
    fn hides(&self, table: AuditTable) -> bool {
        self.hidden.contains(&table)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let InMemoryUnitOfWork {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl PeriodStore for InMemoryUnitOfWork {
    async fn insert_period(&mut self, period: &NewAttendancePeriod) -> StoreResult<u64> {
        let id = self.working.next_id();
        self.working.periods.push(period.clone().persisted(id));
        Ok(id)
    }

    async fn get_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>> {
        Ok(self.working.periods.iter().find(|p| p.id == id).cloned())
    }

    async fn lock_period(&mut self, id: u64) -> StoreResult<Option<AttendancePeriod>> {
        self.get_period(id).await
    }
}

#[async_trait]
impl AttendanceStore for InMemoryUnitOfWork {
    async fn insert_attendance(&mut self, attendance: &NewAttendance) -> StoreResult<u64> {
        let duplicate = self.working.attendances.iter().any(|a| {
            a.user_id == attendance.user_id
                && a.period_id == attendance.period_id
                && a.date == attendance.date
        });
        if duplicate {
            return Err(StoreError::UniqueViolation(
                "attendances.uq_attendance_user_period_date".to_string(),
            ));
        }
        let id = self.working.next_id();
        self.working
            .attendances
            .push(attendance.clone().persisted(id));
        Ok(id)
    }

    async fn get_attendance(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>> {
        if self.hides(AuditTable::Attendances) {
            return Ok(None);
        }
        Ok(self
            .working
            .attendances
            .iter()
            .find(|a| a.user_id == user_id && a.period_id == period_id && a.date == date)
            .cloned())
    }

    async fn employee_attendance_summary(
        &mut self,
        period_id: u64,
    ) -> StoreResult<Vec<EmployeeAttendanceSummary>> {
        let state = &self.working;
        let mut employees: Vec<&User> = state.users.iter().filter(|u| !u.is_admin).collect();
        employees.sort_by_key(|u| u.id);

        Ok(employees
            .into_iter()
            .map(|user| EmployeeAttendanceSummary {
                user_id: user.id,
                base_salary: user.salary,
                present_days: state
                    .attendances
                    .iter()
                    .filter(|a| a.user_id == user.id && a.period_id == period_id)
                    .count() as i64,
                overtime_hours: state
                    .overtimes
                    .iter()
                    .filter(|o| o.user_id == user.id && o.period_id == period_id)
                    .map(|o| i64::from(o.hours))
                    .sum(),
                reimbursement_total: state
                    .reimbursements
                    .iter()
                    .filter(|r| r.user_id == user.id && r.period_id == period_id)
                    .map(|r| r.amount)
                    .sum(),
            })
            .collect())
    }
}

#[async_trait]
impl OvertimeStore for InMemoryUnitOfWork {
    async fn insert_overtime(&mut self, overtime: &NewOvertime) -> StoreResult<u64> {
        let duplicate = self.working.overtimes.iter().any(|o| {
            o.user_id == overtime.user_id
                && o.period_id == overtime.period_id
                && o.date == overtime.date
        });
        if duplicate {
            return Err(StoreError::UniqueViolation(
                "overtimes.uq_overtime_user_period_date".to_string(),
            ));
        }
        let id = self.working.next_id();
        self.working.overtimes.push(overtime.clone().persisted(id));
        Ok(id)
    }

    async fn get_overtime(
        &mut self,
        user_id: u64,
        period_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<Overtime>> {
        if self.hides(AuditTable::Overtimes) {
            return Ok(None);
        }
        Ok(self
            .working
            .overtimes
            .iter()
            .find(|o| o.user_id == user_id && o.period_id == period_id && o.date == date)
            .cloned())
    }
}

#[async_trait]
impl ReimbursementStore for InMemoryUnitOfWork {
    async fn insert_reimbursement(
        &mut self,
        reimbursement: &NewReimbursement,
    ) -> StoreResult<u64> {
        let id = self.working.next_id();
        self.working
            .reimbursements
            .push(reimbursement.clone().persisted(id));
        Ok(id)
    }
}

#[async_trait]
impl PayslipStore for InMemoryUnitOfWork {
    async fn payslips_exist_for_period(&mut self, period_id: u64) -> StoreResult<bool> {
        if self.hides(AuditTable::Payslips) {
            return Ok(false);
        }
        Ok(self
            .working
            .payslips
            .iter()
            .any(|p| p.period_id == period_id))
    }

    async fn bulk_insert_payslips(&mut self, payslips: &[NewPayslip]) -> StoreResult<u64> {
        for payslip in payslips {
            let duplicate = self
                .working
                .payslips
                .iter()
                .any(|p| p.user_id == payslip.user_id && p.period_id == payslip.period_id);
            if duplicate {
                return Err(StoreError::UniqueViolation(
                    "payslips.uq_payslip_user_period".to_string(),
                ));
            }
            let id = self.working.next_id();
            self.working.payslips.push(payslip.clone().persisted(id));
        }
        Ok(payslips.len() as u64)
    }

    async fn payslips_by_user(&mut self, user_id: u64) -> StoreResult<Vec<Payslip>> {
        let mut payslips: Vec<Payslip> = self
            .working
            .payslips
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        payslips.sort_by_key(|p| p.period_id);
        Ok(payslips)
    }

    async fn payslip_summary(&mut self, period_id: u64) -> StoreResult<PayslipSummaryReport> {
        let mut per_user: Vec<PayslipSummary> = Vec::new();
        for payslip in self
            .working
            .payslips
            .iter()
            .filter(|p| p.period_id == period_id)
        {
            match per_user.iter_mut().find(|s| s.user_id == payslip.user_id) {
                Some(summary) => summary.total_take_home += payslip.take_home_pay,
                None => per_user.push(PayslipSummary {
                    user_id: payslip.user_id,
                    total_take_home: payslip.take_home_pay,
                }),
            }
        }
        per_user.sort_by_key(|s| s.user_id);
        let total = per_user.iter().map(|s| s.total_take_home).sum();
        Ok(PayslipSummaryReport { per_user, total })
    }
}

#[async_trait]
impl AuditLedger for InMemoryUnitOfWork {
    async fn insert_request_log(&mut self, log: &NewRequestLog) -> StoreResult<u64> {
        if self.fail_request_log_writes {
            return Err(StoreError::Unavailable("request log offline".to_string()));
        }
        let id = self.working.next_id();
        self.working.request_logs.push(log.clone().persisted(id));
        Ok(id)
    }

    async fn insert_audit_log(&mut self, log: &NewAuditLog) -> StoreResult<u64> {
        if self.fail_audit_writes {
            return Err(StoreError::Unavailable("audit ledger offline".to_string()));
        }
        let id = self.working.next_id();
        self.working.audit_logs.push(log.clone().persisted(id));
        Ok(id)
    }
}

#[async_trait]
impl UserStore for InMemoryUnitOfWork {
    async fn get_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .working
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
