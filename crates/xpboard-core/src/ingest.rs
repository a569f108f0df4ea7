//! Turning a fetched GraphQL payload into typed records
//!
//! This is the only place that looks at raw `type` strings: each row gets its
//! [`RecordKind`] here, so downstream code switches on the tag. Malformed
//! fields never fail the payload; they are coerced and tallied in an
//! [`IngestReport`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};
use xpboard_types::{AuditDirection, CachedDataset, Record, RecordKind, ReportedTotals, UserInfo};

use crate::error::{CoreError, IngestReport};

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ResponseData {
    user: Option<Vec<RawUser>>,
    transaction: Option<Vec<RawTransaction>>,
    skills: Option<Vec<RawTransaction>>,
    audits: Option<Vec<RawTransaction>>,
    audits_done_count: Option<RawAggregate>,
    audits_received_count: Option<RawAggregate>,
    total_xp_sum: Option<RawAggregate>,
}

/// `transaction_aggregate { aggregate { count sum { amount } } }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAggregate {
    aggregate: Option<RawAggregateValues>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAggregateValues {
    count: Option<Value>,
    sum: Option<RawSum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSum {
    amount: Option<Value>,
}

impl RawAggregate {
    fn count(&self) -> Option<usize> {
        let count = self.aggregate.as_ref()?.count.as_ref().and_then(value_to_f64)?;
        (count >= 0.0).then_some(count as usize)
    }

    fn sum_amount(&self) -> Option<f64> {
        let sum = self.aggregate.as_ref()?.sum.as_ref()?;
        sum.amount.as_ref().and_then(value_to_f64)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawUser {
    id: Option<Value>,
    login: Option<String>,
    audit_ratio: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTransaction {
    id: Option<Value>,
    amount: Option<Value>,
    created_at: Option<String>,
    path: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    event_id: Option<Value>,
    object: Option<RawObject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawObject {
    name: Option<String>,
}

/// Which response collection a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Xp,
    Skills,
    Audits,
}

impl Collection {
    fn name(&self) -> &'static str {
        match self {
            Collection::Xp => "transaction",
            Collection::Skills => "skills",
            Collection::Audits => "audits",
        }
    }

    /// Decide the record kind, or `None` if the row does not belong here
    fn classify(&self, raw_type: Option<&str>) -> Option<RecordKind> {
        match self {
            Collection::Xp => match raw_type {
                None | Some("xp") => Some(RecordKind::Xp),
                _ => None,
            },
            // an empty skill type still charts, under the "Unknown Skill" label
            Collection::Skills => match raw_type {
                Some(t) if t.starts_with("skill_") => Some(RecordKind::Skill(t.to_string())),
                None | Some("") => Some(RecordKind::Skill(String::new())),
                _ => None,
            },
            Collection::Audits => raw_type
                .and_then(AuditDirection::from_type)
                .map(RecordKind::Audit),
        }
    }
}

/// Parse a GraphQL response body into a dataset
pub fn parse_response(json: &str) -> Result<(CachedDataset, IngestReport), CoreError> {
    let response: GraphqlResponse =
        serde_json::from_str(json).map_err(|source| CoreError::JsonParse {
            message: source.to_string(),
            source,
        })?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        return Err(CoreError::Graphql {
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    let data = response.data.ok_or(CoreError::MissingData)?;
    let mut report = IngestReport::new();

    let user = data
        .user
        .and_then(|users| users.into_iter().next())
        .map(convert_user);

    let xp = convert_rows(data.transaction, Collection::Xp, &mut report);
    let skills = convert_rows(data.skills, Collection::Skills, &mut report);
    let audits = convert_rows(data.audits, Collection::Audits, &mut report);

    let reported = ReportedTotals {
        audits_done: data.audits_done_count.as_ref().and_then(RawAggregate::count),
        audits_received: data.audits_received_count.as_ref().and_then(RawAggregate::count),
        total_xp: data.total_xp_sum.as_ref().and_then(RawAggregate::sum_amount),
    };

    if report.has_warnings() {
        warn!(
            skipped = report.skipped,
            coerced_amounts = report.coerced_amounts,
            bad_timestamps = report.bad_timestamps,
            "Payload contained malformed rows"
        );
    }
    debug!(
        xp = xp.len(),
        skills = skills.len(),
        audits = audits.len(),
        "Payload ingested"
    );

    let dataset = CachedDataset {
        user,
        xp,
        skills,
        audits,
        reported,
        fetched_at: Some(Utc::now()),
    };
    Ok((dataset, report))
}

fn convert_user(raw: RawUser) -> UserInfo {
    let defaults = UserInfo::default();
    UserInfo {
        id: raw.id.as_ref().map(value_to_string).unwrap_or(defaults.id),
        login: raw.login.unwrap_or(defaults.login),
        audit_ratio: raw.audit_ratio.as_ref().and_then(value_to_f64).unwrap_or(0.0),
    }
}

fn convert_rows(
    rows: Option<Vec<RawTransaction>>,
    collection: Collection,
    report: &mut IngestReport,
) -> Vec<Record> {
    rows.unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| convert_row(raw, index, collection, report))
        .collect()
}

fn convert_row(
    raw: RawTransaction,
    index: usize,
    collection: Collection,
    report: &mut IngestReport,
) -> Option<Record> {
    let Some(kind) = collection.classify(raw.kind.as_deref()) else {
        trace!(collection = collection.name(), kind = ?raw.kind, "Skipping row");
        report.skipped += 1;
        return None;
    };

    let amount = match raw.amount.as_ref().and_then(value_to_f64) {
        Some(amount) => amount,
        None => {
            report.coerced_amounts += 1;
            0.0
        }
    };

    let created_at = raw.created_at.as_deref().and_then(|ts| {
        let parsed = parse_timestamp(ts);
        if parsed.is_none() {
            report.bad_timestamps += 1;
        }
        parsed
    });

    let id = raw
        .id
        .as_ref()
        .map(value_to_string)
        .unwrap_or_else(|| format!("{}-{}", collection.name(), index));

    report.accepted += 1;
    Some(Record {
        id,
        amount,
        created_at,
        path: raw.path.unwrap_or_default(),
        kind,
        object_name: raw.object.and_then(|o| o.name),
        event_id: raw.event_id.as_ref().and_then(value_to_f64).map(|v| v as i64),
    })
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Finite number from a JSON number or numeric string
fn value_to_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
