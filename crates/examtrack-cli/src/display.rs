//! Table rendering shared by the dashboard and exam views.

use comfy_table::{Cell, Table};

use examtrack_core::model::TopicMajor;
use examtrack_core::statistics::TopicBreakdown;

pub fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// The KPI row: total and per-topic percentages, time and mean confidence.
pub fn kpi_table(breakdown: &TopicBreakdown, question_count: Option<usize>) -> Table {
    let mut header = vec!["Total".to_string()];
    header.extend(TopicMajor::ALL.iter().map(|m| m.to_string()));
    if question_count.is_some() {
        header.push("Questions".into());
    }
    header.push("Time (min)".into());
    header.push("Avg conf".into());

    let mut row = vec![Cell::new(pct(breakdown.overall.pct))];
    row.extend(
        TopicMajor::ALL
            .iter()
            .map(|m| Cell::new(pct(breakdown.pct_for(*m)))),
    );
    if let Some(count) = question_count {
        row.push(Cell::new(count));
    }
    row.push(Cell::new(breakdown.overall.time));
    row.push(Cell::new(format!("{:.2}", breakdown.overall.conf_avg)));

    let mut table = Table::new();
    table.set_header(header);
    table.add_row(row);
    table
}

/// Render optional text, with a dash for missing values.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("—")
}
