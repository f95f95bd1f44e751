//! Audit log events for data modifications.
//!
//! ```ignore
//! AuditEvent::new("product.delete", Some(format!("product:{}", id)), AuditOutcome::Success)
//!     .with_actor(claims.as_ref())
//!     .with_request(&headers)
//!     .log();
//! ```

use crate::auth::JwtClaims;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// A structured audit record, emitted on the `audit` tracing target.
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Token subject of the caller, when authenticated
    pub user_id: Option<String>,
    /// e.g. "product.create"
    pub action: String,
    /// e.g. "product:12"
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            user_id: None,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_actor(mut self, claims: Option<&JwtClaims>) -> Self {
        self.user_id = claims.map(|c| c.sub.clone());
        self
    }

    /// Record client IP and user agent from request headers.
    pub fn with_request(mut self, headers: &HeaderMap) -> Self {
        self.ip_address = extract_ip_from_headers(headers);
        self.user_agent = extract_user_agent(headers);
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            user_id = self.user_id,
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| self.action.clone())
        );
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
