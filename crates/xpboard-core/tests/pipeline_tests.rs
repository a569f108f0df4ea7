//! End-to-end tests: payload -> aggregation -> scale -> scene

use xpboard_core::{
    build_charts, compute_scale, parse_response, render_chart, ChartStyle, RenderSettings,
    DEFAULT_TICK_COUNT,
};
use xpboard_types::{
    Axis, CachedDataset, ChartKind, ChartViewports, LabeledValue, Placeholder, Record,
    RenderedChart, SceneElement, Series, Viewport,
};

fn many_projects(count: usize) -> CachedDataset {
    CachedDataset {
        xp: (0..count)
            .map(|i| Record::xp(i.to_string(), format!("/kisumu/module/project-{i}"), (i + 1) as f64 * 100.0))
            .collect(),
        ..Default::default()
    }
}

fn bars(chart: &RenderedChart) -> Vec<(f64, f64, f64, f64, &str)> {
    chart
        .elements
        .iter()
        .filter_map(|e| match e {
            SceneElement::Bar {
                x,
                y,
                width,
                height,
                tooltip,
                ..
            } => Some((*x, *y, *width, *height, tooltip.as_str())),
            _ => None,
        })
        .collect()
}

fn x_labels(chart: &RenderedChart) -> Vec<&str> {
    chart
        .elements
        .iter()
        .filter_map(|e| match e {
            SceneElement::AxisTick {
                axis: Axis::X,
                label,
                ..
            } => Some(label.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_at_most_ten_bars_in_descending_order() {
    let [xp, _] = build_charts(
        &many_projects(15),
        &ChartViewports::default(),
        RenderSettings::default(),
    );

    let bars = bars(&xp);
    assert_eq!(bars.len(), 10);
    assert!(bars.windows(2).all(|w| w[0].3 >= w[1].3));
    assert!(bars[0].4.starts_with("Project 14: 1,500 XP"));
}

#[test]
fn test_bars_stay_inside_plot_area() {
    let viewports = ChartViewports::default();
    let [xp, skills] = build_charts(&many_projects(7), &viewports, RenderSettings::default());

    for (chart, vp) in [(&xp, viewports.xp), (&skills, viewports.skills)] {
        let left = vp.margin.left;
        let right = vp.width - vp.margin.right;
        let top = vp.margin.top;
        let bottom = vp.height - vp.margin.bottom;
        for (x, y, width, height, _) in bars(chart) {
            assert!(x >= left - 1e-9 && x + width <= right + 1e-9);
            assert!(y >= top - 1e-9 && y + height <= bottom + 1e-9);
        }
    }
}

#[test]
fn test_tallest_bar_spans_value_axis() {
    let viewport = Viewport::xp_default();
    let [xp, _] = build_charts(
        &many_projects(4),
        &ChartViewports::default(),
        RenderSettings::default(),
    );

    let tallest = bars(&xp).iter().map(|b| b.3).fold(0.0, f64::max);
    assert!((tallest - viewport.usable_height()).abs() < 1e-9);
}

#[test]
fn test_skill_chart_uses_max_level() {
    let dataset = CachedDataset {
        skills: vec![
            Record::skill("1", "skill_go", 40.0),
            Record::skill("2", "skill_go", 65.0),
            Record::skill("3", "skill_front-end", 30.0),
        ],
        ..Default::default()
    };

    let [xp, skills] = build_charts(&dataset, &ChartViewports::default(), RenderSettings::default());

    assert_eq!(xp.placeholder, Some(Placeholder::NoData));
    assert_eq!(
        xp.placeholder_message(),
        Some("No project XP data available")
    );
    assert_eq!(x_labels(&skills), vec!["Go", "Front End"]);
    assert_eq!(bars(&skills)[0].4, "Go: 65%");
}

#[test]
fn test_long_labels_truncated() {
    let dataset = CachedDataset {
        xp: vec![Record::xp(
            "1",
            "/kisumu/module/make-your-game-history-extended",
            500.0,
        )],
        skills: vec![Record::skill("2", "skill_sys-admin-and-devops", 20.0)],
        ..Default::default()
    };

    let [xp, skills] = build_charts(&dataset, &ChartViewports::default(), RenderSettings::default());

    // full names stay in tooltips
    assert_eq!(x_labels(&xp), vec!["Make Your Ga..."]);
    assert!(bars(&xp)[0].4.starts_with("Make Your Game History Extended"));
    assert_eq!(x_labels(&skills), vec!["Sys Admin..."]);
}

#[test]
fn test_all_zero_and_tiny_viewport_placeholders() {
    let zero = Series::ranked(vec![LabeledValue::new("a", 0.0)], 10);
    let chart = render_chart(
        &zero,
        &Viewport::skills_default(),
        &ChartStyle::skills(),
        DEFAULT_TICK_COUNT,
    );
    assert_eq!(chart.placeholder, Some(Placeholder::AllZero));
    assert_eq!(
        chart.placeholder_message(),
        Some("All skills have 0% progress.")
    );
    assert!(chart.elements.is_empty());

    let some = Series::ranked(vec![LabeledValue::new("a", 10.0)], 10);
    let tiny = Viewport::xp_default().resized(90.0, 150.0);
    let chart = render_chart(&some, &tiny, &ChartStyle::xp_by_project(), DEFAULT_TICK_COUNT);
    assert_eq!(chart.placeholder, Some(Placeholder::ViewportTooSmall));
    assert!(compute_scale(&some, &tiny, DEFAULT_TICK_COUNT).is_err());
}

#[test]
fn test_nan_viewport_renders_placeholder() {
    let series = Series::ranked(vec![LabeledValue::new("a", 10.0)], 10);
    let viewport = Viewport::xp_default().resized(f64::NAN, 380.0);

    let chart = render_chart(&series, &viewport, &ChartStyle::xp_by_project(), DEFAULT_TICK_COUNT);
    assert_eq!(chart.placeholder, Some(Placeholder::ViewportTooSmall));
    assert!(chart.elements.is_empty());
}

#[test]
fn test_payload_to_charts() {
    let payload = r#"{
        "data": {
            "user": [{"id": 1, "login": "jdoe", "auditRatio": 1.1}],
            "transaction": [
                {"amount": 1000, "path": "/kisumu/module/go-reloaded", "type": "xp"},
                {"amount": 500, "path": "/kisumu/module/go-reloaded", "type": "xp"},
                {"amount": 0, "path": "/kisumu/module/empty", "type": "xp"},
                {"amount": 2000, "path": "/kisumu/module/piscine-js/quest-03", "type": "xp"}
            ],
            "skills": [{"type": "skill_prog", "amount": 50}]
        }
    }"#;

    let (dataset, _) = parse_response(payload).unwrap();
    let [xp, skills] = build_charts(&dataset, &ChartViewports::default(), RenderSettings::default());

    assert_eq!(xp.kind, ChartKind::XpByProject);
    assert_eq!(x_labels(&xp), vec!["03", "Go Reloaded"]);
    assert_eq!(bars(&xp)[1].4, "Go Reloaded: 1,500 XP");
    assert_eq!(skills.bar_count(), 1);
}

#[test]
fn test_resize_changes_geometry_only() {
    let dataset = many_projects(3);
    let settings = RenderSettings::default();
    let narrow = ChartViewports::default();
    let mut wide = narrow;
    wide.xp = wide.xp.resized(900.0, 380.0);

    let [before, _] = build_charts(&dataset, &narrow, settings);
    let [after, _] = build_charts(&dataset, &wide, settings);

    assert_eq!(x_labels(&before), x_labels(&after));
    let widths_before: Vec<f64> = bars(&before).iter().map(|b| b.2).collect();
    let widths_after: Vec<f64> = bars(&after).iter().map(|b| b.2).collect();
    assert!(widths_before
        .iter()
        .zip(&widths_after)
        .all(|(b, a)| a > b));
}
