use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, instrument};

use crate::error::PayrollResult;
use crate::model::audit::{AuditAction, AuditTable, NewAuditLog, NewRequestLog};
use crate::model::timestamp_now;
use crate::repository::{AuditLedger, Database, UnitOfWork};
use crate::service::Actor;

/// One state change to be written to the audit ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub table: AuditTable,
    pub record_id: u64,
    pub action: AuditAction,
    pub old_data: Value,
    pub new_data: Value,
    pub actor: Actor,
}

impl Mutation {
    /// A `CREATE` entry: empty prior state, `record` as the new state.
    pub fn created<T: Serialize + ?Sized>(
        table: AuditTable,
        record_id: u64,
        record: &T,
        actor: Actor,
    ) -> PayrollResult<Self> {
        Ok(Self {
            table,
            record_id,
            action: AuditAction::Create,
            old_data: json!({}),
            new_data: serde_json::to_value(record)?,
            actor,
        })
    }
}

/// Sole writer of the request log and the audit ledger. Failures are
/// returned to the caller as-is, never retried or swallowed.
#[derive(Clone)]
pub struct AuditRecorder {
    db: Arc<dyn Database>,
}

impl AuditRecorder {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Appends a request log in its own unit of work and returns its id.
    #[instrument(skip(self))]
    pub async fn record_request(&self, url: &str, method: &str, ip: &str) -> PayrollResult<u64> {
        let mut tx = self.db.begin().await?;
        let id = tx
            .insert_request_log(&NewRequestLog {
                url: url.to_string(),
                method: method.to_string(),
                ip_address: ip.to_string(),
                created_at: timestamp_now(),
            })
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Appends an audit entry through `ledger`, which is normally the unit
    /// of work that performed the mutation.
    #[instrument(
        skip(self, ledger, mutation),
        fields(table = %mutation.table, record_id = mutation.record_id)
    )]
    pub async fn record_mutation<L>(&self, ledger: &mut L, mutation: Mutation) -> PayrollResult<u64>
    where
        L: AuditLedger + ?Sized,
    {
        let log = NewAuditLog {
            table_name: mutation.table,
            record_id: mutation.record_id,
            action: mutation.action,
            old_data: mutation.old_data,
            new_data: mutation.new_data,
            changed_by: Some(mutation.actor.user_id),
            request_id: Some(mutation.actor.request_id),
            created_at: timestamp_now(),
        };

        ledger.insert_audit_log(&log).await.map_err(|e| {
            error!(error = %e, "failed to write audit log");
            e.into()
        })
    }
}
