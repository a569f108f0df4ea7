use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of an audit transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditDirection {
    /// Audit performed by the learner (`"up"`)
    Done,
    /// Audit received from a peer (`"down"`)
    Received,
}

impl AuditDirection {
    /// Map the backend transaction type onto a direction
    pub fn from_type(raw: &str) -> Option<Self> {
        match raw {
            "up" => Some(Self::Done),
            "down" => Some(Self::Received),
            _ => None,
        }
    }
}

/// Kind of a record, decided once at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordKind {
    /// Amount-bearing XP transaction
    Xp,
    /// Skill transaction, carrying the raw skill type (e.g. `skill_go`)
    Skill(String),
    /// Audit transaction
    Audit(AuditDirection),
}

impl RecordKind {
    pub fn is_xp(&self) -> bool {
        matches!(self, RecordKind::Xp)
    }

    /// Raw skill type, if this is a skill record
    pub fn skill_type(&self) -> Option<&str> {
        match self {
            RecordKind::Skill(name) => Some(name),
            _ => None,
        }
    }

    pub fn audit_direction(&self) -> Option<AuditDirection> {
        match self {
            RecordKind::Audit(direction) => Some(*direction),
            _ => None,
        }
    }
}

/// One raw transaction or skill entry
///
/// Immutable once fetched. `amount` is always finite; missing or malformed
/// amounts are coerced to `0.0` before a `Record` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub amount: f64,
    pub created_at: Option<DateTime<Utc>>,
    /// Object path (e.g. `/kisumu/module/piscine-go/ex00`), empty if absent
    pub path: String,
    pub kind: RecordKind,
    /// Name of the related object, if the backend supplied one
    #[serde(default)]
    pub object_name: Option<String>,
    /// Event the transaction belongs to
    #[serde(default)]
    pub event_id: Option<i64>,
}

impl Record {
    /// Minimal XP record, mostly useful for tests and fixtures
    pub fn xp(id: impl Into<String>, path: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            amount,
            created_at: None,
            path: path.into(),
            kind: RecordKind::Xp,
            object_name: None,
            event_id: None,
        }
    }

    /// Minimal skill record
    pub fn skill(id: impl Into<String>, skill_type: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            amount,
            created_at: None,
            path: String::new(),
            kind: RecordKind::Skill(skill_type.into()),
            object_name: None,
            event_id: None,
        }
    }

    /// Minimal audit record
    pub fn audit(id: impl Into<String>, direction: AuditDirection, amount: f64) -> Self {
        Self {
            id: id.into(),
            amount,
            created_at: None,
            path: String::new(),
            kind: RecordKind::Audit(direction),
            object_name: None,
            event_id: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
