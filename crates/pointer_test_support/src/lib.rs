//! Fixture loading and failure formatting for pointer scenario tests.

pub mod scenario;

pub use scenario::{
    SCENARIO_FORMAT_V1, Scenario, ScenarioEvent, ScenarioHost, ScenarioOutcome, load_scenario,
    load_scenarios_in, run_scenario,
};

use std::fmt::Write;

const MISSING: &str = "<missing>";
const CONTEXT: usize = 2;

fn line(lines: &[String], idx: usize) -> &str {
    lines.get(idx).map_or(MISSING, String::as_str)
}

/// Render the first mismatch between two callback logs with a little
/// context, followed by both lengths.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let total = expected.len().max(actual.len());
    let mut out = String::new();

    if let Some(first) = (0..total).find(|&i| line(expected, i) != line(actual, i)) {
        let shown = first.saturating_sub(CONTEXT)..(first + CONTEXT + 1).min(total);
        let _ = writeln!(
            out,
            "first mismatch at line {} (showing {}..={}):",
            first + 1,
            shown.start + 1,
            shown.end
        );
        for idx in shown {
            let marker = if idx == first { '>' } else { ' ' };
            let n = idx + 1;
            let _ = writeln!(out, "{marker} {n:>4}  expected: {}", line(expected, idx));
            let _ = writeln!(out, "{marker} {n:>4}    actual: {}", line(actual, idx));
        }
    }
    let _ = writeln!(
        out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = owned(&["begin 1 0 0", "extend 1 5 0", "end 1"]);
        let actual = owned(&["begin 1 0 0", "extend 1 6 0", "end 1"]);
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2"));
        assert!(diff.contains(">    2  expected: extend 1 5 0"));
        assert!(diff.contains(">    2    actual: extend 1 6 0"));
    }

    #[test]
    fn identical_logs_only_report_lengths() {
        let lines = owned(&["begin 0 3 4", "end 0"]);
        assert_eq!(diff_lines(&lines, &lines), "expected 2 lines, actual 2 lines\n");
    }

    #[test]
    fn diff_reports_missing_tail() {
        let expected = owned(&["begin 1 0 0", "end 1"]);
        let actual = owned(&["begin 1 0 0"]);
        let diff = diff_lines(&expected, &actual);
        assert!(diff.contains("actual: <missing>"));
        assert!(diff.contains("expected 2 lines, actual 1 lines"));
    }
}
