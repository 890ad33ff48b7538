//! Audit records for guard decisions

use chrono::{DateTime, Utc};
use dealergate_core::access::Decision;
use dealergate_core::Principal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// One authorization decision, suitable for an audit sink.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    /// Which guard made the decision (`role_guard`, `access_gate`, `http`)
    pub guard: &'static str,
    pub role: String,
    pub dealer: Option<String>,
    pub granted: bool,
    pub reason: Option<String>,
}

impl AuditRecord {
    pub fn new(guard: &'static str, principal: &Principal, decision: &Decision) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            guard,
            role: principal.role.to_string(),
            dealer: principal.dealer_id.as_ref().map(ToString::to_string),
            granted: decision.is_granted(),
            reason: decision.reason().map(ToString::to_string),
        }
    }

    /// Write the record to the tracing pipeline.
    ///
    /// Grants log at `info`, denials at `warn`.
    pub fn emit(&self) {
        let dealer = self.dealer.as_deref().unwrap_or("-");
        if self.granted {
            info!(
                audit_id = %self.id,
                guard = self.guard,
                role = %self.role,
                dealer = %dealer,
                result = "granted",
                "Access check"
            );
        } else {
            warn!(
                audit_id = %self.id,
                guard = self.guard,
                role = %self.role,
                dealer = %dealer,
                result = "denied",
                reason = self.reason.as_deref().unwrap_or("-"),
                "Access check"
            );
        }
    }
}

/// Build and emit a record in one step
pub fn record(guard: &'static str, principal: &Principal, decision: &Decision) -> AuditRecord {
    let record = AuditRecord::new(guard, principal, decision);
    record.emit();
    record
}
