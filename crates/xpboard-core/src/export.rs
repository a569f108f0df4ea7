//! Drawing surfaces and file export for rendered charts
//!
//! [`SvgSurface`] paints scenes into standalone SVG documents;
//! [`export_chart_json`] writes the scene description itself.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use xpboard_types::{Axis, ChartKind, RenderedChart, SceneElement};

use crate::render::DrawingSurface;

const GRID_STROKE: &str = "#4A5568";
const TICK_FILL: &str = "#A0AEC0";
const LABEL_FILL: &str = "#CBD5E0";
const TITLE_FILL: &str = "#E2E8F0";
const VALUE_FILL: &str = "#C3DAFE";

/// Keeps the latest SVG document per chart
#[derive(Debug, Default)]
pub struct SvgSurface {
    documents: BTreeMap<ChartKind, String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, kind: ChartKind) -> Option<&str> {
        self.documents.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Write every document as `<dir>/<chart-slug>.svg`
    pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let mut written = Vec::with_capacity(self.documents.len());
        for (kind, svg) in &self.documents {
            let path = dir.join(format!("{}.svg", kind.slug()));
            std::fs::write(&path, svg)
                .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl DrawingSurface for SvgSurface {
    fn draw(&mut self, chart: RenderedChart) {
        self.documents.insert(chart.kind, render_svg(&chart));
    }
}

/// Serialize one chart as a standalone SVG document
pub fn render_svg(chart: &RenderedChart) -> String {
    let mut svg = String::new();
    let gradient_id = format!("{}-gradient", chart.kind.slug());

    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = px(chart.width),
        h = px(chart.height)
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape(chart.kind.title()));

    if let Some(message) = chart.placeholder_message() {
        let _ = writeln!(
            svg,
            r#"  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="{TICK_FILL}" font-size="14px">{}</text>"#,
            escape(message)
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let _ = writeln!(
        svg,
        r#"  <defs><linearGradient id="{gradient_id}" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" style="stop-color:{};stop-opacity:1"/><stop offset="100%" style="stop-color:{};stop-opacity:1"/></linearGradient></defs>"#,
        chart.gradient.top, chart.gradient.bottom
    );

    for element in &chart.elements {
        write_element(&mut svg, element, &gradient_id);
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_element(svg: &mut String, element: &SceneElement, gradient_id: &str) {
    match element {
        SceneElement::GridLine { y, x1, x2 } => {
            let _ = writeln!(
                svg,
                r#"  <line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{GRID_STROKE}" stroke-dasharray="3,3"/>"#,
                px(*x1),
                px(*x2),
                y = px(*y)
            );
        }
        SceneElement::AxisTick {
            axis: Axis::Y,
            x,
            y,
            label,
            ..
        } => {
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" text-anchor="end" font-size="11px" fill="{TICK_FILL}">{}</text>"#,
                px(*x),
                px(*y + 4.0),
                escape(label)
            );
        }
        SceneElement::AxisTick {
            axis: Axis::X,
            x,
            y,
            label,
            rotation,
        } => {
            let _ = writeln!(
                svg,
                r#"  <text x="{x}" y="{y}" text-anchor="end" transform="rotate({} {x} {y})" font-size="10px" fill="{LABEL_FILL}">{}</text>"#,
                px(*rotation),
                escape(label),
                x = px(*x),
                y = px(*y)
            );
        }
        SceneElement::AxisTitle {
            text,
            x,
            y,
            rotation,
        } => {
            let _ = writeln!(
                svg,
                r#"  <text x="{x}" y="{y}" text-anchor="middle" transform="rotate({} {x} {y})" font-size="13px" font-weight="500" fill="{TITLE_FILL}">{}</text>"#,
                px(*rotation),
                escape(text),
                x = px(*x),
                y = px(*y)
            );
        }
        SceneElement::Bar {
            x,
            y,
            width,
            height,
            tooltip,
            value_label,
        } => {
            let _ = writeln!(
                svg,
                r#"  <rect class="chart-bar" x="{}" y="{}" width="{}" height="{}" rx="3" ry="3" fill="url(#{gradient_id})"><title>{}</title></rect>"#,
                px(*x),
                px(*y),
                px(width.max(0.0)),
                px(height.max(0.0)),
                escape(tooltip)
            );
            if let Some(label) = value_label {
                let _ = writeln!(
                    svg,
                    r#"  <text x="{}" y="{}" text-anchor="middle" font-size="10px" font-weight="600" fill="{VALUE_FILL}">{}</text>"#,
                    px(label.x),
                    px(label.y),
                    escape(&label.text)
                );
            }
        }
    }
}

/// Export one chart's scene description as pretty JSON, creating parent directories
pub fn export_chart_json(chart: &RenderedChart, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, chart).context("Failed to serialize JSON")?;
    writer.flush().context("Failed to flush JSON file")?;
    Ok(())
}

/// Compact pixel value: at most two decimals, no trailing zeros
fn px(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{render_chart, ChartStyle};
    use tempfile::TempDir;
    use xpboard_types::{LabeledValue, Series, Viewport};

    fn chart(pairs: &[(&str, f64)]) -> RenderedChart {
        let series = Series::ranked(
            pairs
                .iter()
                .map(|(l, v)| LabeledValue::new(*l, *v))
                .collect(),
            10,
        );
        render_chart(
            &series,
            &Viewport::xp_default(),
            &ChartStyle::xp_by_project(),
            5,
        )
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(100.0), "100");
        assert_eq!(px(12.5), "12.5");
        assert_eq!(px(1.0 / 3.0), "0.33");
        assert_eq!(px(-0.001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("R&D <x>"), "R&amp;D &lt;x&gt;");
    }

    #[test]
    fn test_render_svg_contains_bars_and_gradient() {
        let svg = render_svg(&chart(&[("Go Reloaded", 1200.0), ("Ascii Art", 800.0)]));

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(r#"id="xp-by-project-gradient""#));
        assert!(svg.contains("stop-color:#A78BFA"));
        assert!(svg.contains("<title>Go Reloaded: 1,200 XP</title>"));
    }

    #[test]
    fn test_render_svg_placeholder() {
        let svg = render_svg(&chart(&[]));
        assert!(svg.contains("No project XP data available"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_svg_surface_keeps_latest_per_kind() {
        let mut surface = SvgSurface::new();
        surface.draw(chart(&[("a", 1.0)]));
        surface.draw(chart(&[("a", 1.0), ("b", 2.0)]));

        assert_eq!(surface.len(), 1);
        let doc = surface.document(ChartKind::XpByProject).unwrap();
        assert_eq!(doc.matches("<rect").count(), 2);
    }

    #[test]
    fn test_write_all_and_json_export() {
        let dir = TempDir::new().unwrap();
        let mut surface = SvgSurface::new();
        let rendered = chart(&[("a", 1.0)]);
        surface.draw(rendered.clone());

        let written = surface.write_all(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("xp-by-project.svg")]);

        let json_path = dir.path().join("scenes").join("xp.json");
        export_chart_json(&rendered, &json_path).unwrap();
        let content = std::fs::read_to_string(&json_path).unwrap();
        let parsed: RenderedChart = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, rendered);
    }
}
