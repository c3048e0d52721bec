//! Audit log endpoints.

use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListOptions, Page, QueryBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_time: Option<DateTime<Utc>>,
}

impl Client {
    /// `GET /audit-logs`
    pub async fn list_audit_logs(&self, options: &ListOptions) -> Result<Page<AuditLog>> {
        let mut query = QueryBuilder::new();
        options.append_to(&mut query);
        self.get_page(&query.apply_to("/audit-logs")).await
    }
}
