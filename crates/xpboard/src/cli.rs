//! Terminal output: summary tables and the JSON scene surface

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use xpboard_core::{export_chart_json, DrawingSurface, Summary, TransactionRow};
use xpboard_types::{ChartKind, RenderedChart};

/// Keeps the latest scene per chart for JSON export
#[derive(Debug, Default)]
pub struct SceneSurface {
    charts: BTreeMap<ChartKind, RenderedChart>,
}

impl SceneSurface {
    /// Write every scene as `<dir>/<chart-slug>.json`
    pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.charts.len());
        for (kind, chart) in &self.charts {
            let path = dir.join(format!("{}.json", kind.slug()));
            export_chart_json(chart, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

impl DrawingSurface for SceneSurface {
    fn draw(&mut self, chart: RenderedChart) {
        self.charts.insert(chart.kind, chart);
    }
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: &'a Summary,
    recent_transactions: &'a [TransactionRow],
}

/// Format the summary and recent transactions (human or JSON)
pub fn format_summary(
    summary: &Summary,
    rows: &[TransactionRow],
    json: bool,
    no_color: bool,
) -> String {
    if json {
        let output = SummaryOutput {
            summary,
            recent_transactions: rows,
        };
        return serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = String::new();
    out.push_str(&format!("User:        {} (ID {})\n", summary.login, summary.user_id));
    out.push_str(&format!("Total XP:    {}\n", summary.total_xp_display));
    out.push_str(&format!("Audit ratio: {}\n", summary.audit_ratio_display));
    out.push_str(&format!(
        "Audits:      {} done, {} received\n",
        summary.audits_done, summary.audits_received
    ));
    out.push_str(&format!(
        "Records:     {} XP across {} projects, {} skills\n\n",
        summary.xp_records, summary.projects, summary.skills
    ));
    out.push_str(&format_transactions(rows, no_color));
    out
}

/// Recent transactions as a table
pub fn format_transactions(rows: &[TransactionRow], no_color: bool) -> String {
    if rows.is_empty() {
        return "No recent transactions.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(vec!["Project", "XP", "Date"]);
    } else {
        table.set_header(vec![
            Cell::new("Project").fg(Color::Cyan),
            Cell::new("XP").fg(Color::Cyan),
            Cell::new("Date").fg(Color::Cyan),
        ]);
    }

    for row in rows {
        let date = row
            .created_at
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        table.add_row(Row::from(vec![&row.name, &row.amount_display, &date]));
    }

    table.to_string()
}
