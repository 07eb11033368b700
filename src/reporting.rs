//! Text and JSON rendering of batch results.

use serde::Serialize;

use crate::sim::averager::Estimate;
use crate::sim::kpi::TrialReport;

/// Everything the binary prints for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Thermostat name per estimate, in print order.
    pub estimates: Vec<NamedEstimate>,
    /// Breakdown of one traced trial, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TrialReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedEstimate {
    pub thermostat: &'static str,
    #[serde(flatten)]
    pub estimate: Estimate,
}

/// Renders the summary as human-readable text.
pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    for e in &summary.estimates {
        out.push_str(&format!("{:<16} {}\n", e.thermostat, e.estimate));
    }
    if let [a, b] = summary.estimates.as_slice() {
        out.push_str(&format!(
            "{:<16} {:+.2}\n",
            "difference",
            b.estimate.mean_cost - a.estimate.mean_cost
        ));
    }
    if let Some(report) = &summary.report {
        out.push('\n');
        out.push_str(&report.to_string());
        out.push('\n');
    }
    out
}

/// Renders the summary as one JSON object.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn render_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
