use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{AuditDirection, Record};

/// Basic identity of the signed-in learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub login: String,
    /// Ratio as reported by the backend (0 when absent)
    #[serde(default)]
    pub audit_ratio: f64,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            id: "N/A".to_string(),
            login: "N/A".to_string(),
            audit_ratio: 0.0,
        }
    }
}

/// Server-side aggregates returned next to the record lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedTotals {
    pub audits_done: Option<usize>,
    pub audits_received: Option<usize>,
    /// Already restricted to whatever the query selected
    pub total_xp: Option<f64>,
}

/// Snapshot of the last successfully fetched record sets
///
/// Replaced wholesale on every successful load, never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CachedDataset {
    pub user: Option<UserInfo>,
    pub xp: Vec<Record>,
    pub skills: Vec<Record>,
    pub audits: Vec<Record>,
    #[serde(default)]
    pub reported: ReportedTotals,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CachedDataset {
    pub fn is_empty(&self) -> bool {
        self.xp.is_empty() && self.skills.is_empty() && self.audits.is_empty()
    }

    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.xp.len() + self.skills.len() + self.audits.len()
    }

    /// Audit records in the given direction
    pub fn audits_in(&self, direction: AuditDirection) -> impl Iterator<Item = &Record> {
        self.audits
            .iter()
            .filter(move |r| r.kind.audit_direction() == Some(direction))
    }
}
