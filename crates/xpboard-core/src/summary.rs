//! Scalar summary values for the dashboard header and the
//! recent-transactions table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use xpboard_types::{AuditDirection, CachedDataset, Record};

use crate::format::{format_ratio, format_thousands, format_xp};
use crate::normalize::{normalize_project_name, normalize_skill_name};

/// Which XP records count toward the displayed total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TotalXpPolicy {
    /// Every XP record
    AllXp,
    /// Only XP earned within one event (e.g. the main curriculum)
    EventScoped { event_id: i64 },
}

impl TotalXpPolicy {
    pub fn includes(&self, record: &Record) -> bool {
        match self {
            TotalXpPolicy::AllXp => true,
            TotalXpPolicy::EventScoped { event_id } => record.event_id == Some(*event_id),
        }
    }
}

/// Values consumed by the summary-text sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub user_id: String,
    pub login: String,
    pub total_xp: f64,
    pub total_xp_display: String,
    pub audit_ratio: f64,
    pub audit_ratio_display: String,
    pub audits_done: usize,
    pub audits_received: usize,
    pub xp_records: usize,
    pub projects: usize,
    pub skills: usize,
}

/// Reduce a dataset to the summary values
///
/// Totals the server reported alongside the records win over local counts;
/// `policy` only applies when the total is computed here.
pub fn compute_summary(dataset: &CachedDataset, policy: TotalXpPolicy) -> Summary {
    let xp: Vec<&Record> = dataset.xp.iter().filter(|r| r.kind.is_xp()).collect();
    let reported = dataset.reported;

    let total_xp = reported.total_xp.unwrap_or_else(|| {
        xp.iter()
            .filter(|r| policy.includes(r))
            .map(|r| r.amount)
            .sum()
    });

    let projects: HashSet<String> = xp
        .iter()
        .filter(|r| r.amount > 0.0)
        .map(|r| normalize_project_name(&r.path))
        .collect();

    let skills: HashSet<String> = dataset
        .skills
        .iter()
        .filter_map(|r| r.kind.skill_type())
        .map(normalize_skill_name)
        .collect();

    let (user_id, login, reported_ratio) = match &dataset.user {
        Some(user) => (user.id.clone(), user.login.clone(), Some(user.audit_ratio)),
        None => ("N/A".to_string(), "N/A".to_string(), None),
    };
    let audit_ratio = reported_ratio.unwrap_or_else(|| computed_audit_ratio(dataset));

    Summary {
        user_id,
        login,
        total_xp,
        total_xp_display: format_xp(total_xp),
        audit_ratio,
        audit_ratio_display: format_ratio(audit_ratio),
        audits_done: reported
            .audits_done
            .unwrap_or_else(|| dataset.audits_in(AuditDirection::Done).count()),
        audits_received: reported
            .audits_received
            .unwrap_or_else(|| dataset.audits_in(AuditDirection::Received).count()),
        xp_records: xp.len(),
        projects: projects.len(),
        skills: skills.len(),
    }
}

/// Given/received ratio from audit amounts, 0 when nothing was received
fn computed_audit_ratio(dataset: &CachedDataset) -> f64 {
    let done: f64 = dataset.audits_in(AuditDirection::Done).map(|r| r.amount).sum();
    let received: f64 = dataset
        .audits_in(AuditDirection::Received)
        .map(|r| r.amount)
        .sum();

    if received > 0.0 {
        done / received
    } else {
        0.0
    }
}

/// One row of the recent-transactions table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub name: String,
    pub amount: f64,
    pub amount_display: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Newest XP transactions first, undated ones last
pub fn recent_transactions(dataset: &CachedDataset, limit: usize) -> Vec<TransactionRow> {
    let mut xp: Vec<&Record> = dataset.xp.iter().filter(|r| r.kind.is_xp()).collect();
    xp.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    xp.into_iter()
        .take(limit)
        .map(|r| {
            let name = match (&r.object_name, r.path.is_empty()) {
                (Some(object), true) => object.clone(),
                _ => normalize_project_name(&r.path),
            };
            TransactionRow {
                name,
                amount: r.amount,
                amount_display: format_thousands(r.amount),
                created_at: r.created_at,
            }
        })
        .collect()
}
