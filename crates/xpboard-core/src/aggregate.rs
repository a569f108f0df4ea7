//! Grouping records into ranked series
//!
//! The aggregator performs no kind filtering: callers pass only the records
//! that belong on a chart. [`xp_by_project`] and [`skill_levels`] are the two
//! pre-filtering callers used by the dashboard.

use std::collections::HashMap;

use xpboard_types::{CachedDataset, ChartKind, LabeledValue, Record, Series, MAX_SERIES_LEN};

use crate::normalize::{normalize_project_name, normalize_skill_name};

/// How values sharing a label are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Add amounts together (XP per project)
    Sum,
    /// Keep the largest amount (skill level)
    Max,
}

impl Reducer {
    fn apply(&self, acc: f64, value: f64) -> f64 {
        match self {
            Reducer::Sum => acc + value,
            Reducer::Max => acc.max(value),
        }
    }
}

/// Group, reduce, rank and keep the top [`MAX_SERIES_LEN`] entries
pub fn aggregate<'a, I, F>(records: I, label_of: F, reducer: Reducer) -> Series
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> String,
{
    aggregate_top(records, label_of, reducer, MAX_SERIES_LEN)
}

/// Like [`aggregate`] with a configurable entry limit
pub fn aggregate_top<'a, I, F>(records: I, label_of: F, reducer: Reducer, limit: usize) -> Series
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> String,
{
    // Vec keeps discovery order for stable tie-breaking, the map indexes into it
    let mut groups: Vec<LabeledValue> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let amount = if record.amount.is_finite() {
            record.amount
        } else {
            0.0
        };
        let label = label_of(record);

        match index.get(&label) {
            Some(&i) => {
                let entry = &mut groups[i];
                entry.value = reducer.apply(entry.value, amount);
            }
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(LabeledValue::new(label, amount));
            }
        }
    }

    let series = Series::ranked(groups, limit);
    tracing::trace!(
        groups = index.len(),
        kept = series.len(),
        ?reducer,
        "Aggregated records"
    );
    series
}

/// XP summed per project, positive amounts only
pub fn xp_by_project(dataset: &CachedDataset, limit: usize) -> Series {
    let records = dataset
        .xp
        .iter()
        .filter(|r| r.kind.is_xp() && r.amount > 0.0);

    aggregate_top(
        records,
        |r| normalize_project_name(&r.path),
        Reducer::Sum,
        limit,
    )
}

/// Highest observed level per skill
pub fn skill_levels(dataset: &CachedDataset, limit: usize) -> Series {
    let records = dataset.skills.iter().filter(|r| r.kind.skill_type().is_some());

    aggregate_top(
        records,
        |r| normalize_skill_name(r.kind.skill_type().unwrap_or_default()),
        Reducer::Max,
        limit,
    )
}

/// The series feeding the chart of `kind`
pub fn series_for(dataset: &CachedDataset, kind: ChartKind, limit: usize) -> Series {
    match kind {
        ChartKind::XpByProject => xp_by_project(dataset, limit),
        ChartKind::Skills => skill_levels(dataset, limit),
    }
}
