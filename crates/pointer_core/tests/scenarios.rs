use std::env;
use std::path::{Path, PathBuf};

use pointer_core::Handled;
use pointer_test_support::{Scenario, ScenarioOutcome, diff_lines, load_scenarios_in, run_scenario};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// `POINTER_SCENARIO_FILTER=multi` runs only scenarios whose file name
/// contains the substring.
fn scenario_filter() -> Option<String> {
    env::var("POINTER_SCENARIO_FILTER")
        .ok()
        .filter(|s| !s.is_empty())
}

fn enforce_expected(path: &Path, scenario: &Scenario, outcome: &ScenarioOutcome) {
    if outcome.lines != scenario.expect {
        panic!(
            "callback mismatch in scenario '{}'\npath: {}\n{}",
            scenario.name,
            path.display(),
            diff_lines(&scenario.expect, &outcome.lines)
        );
    }
    if let Some(expected_logs) = &scenario.expect_logs
        && &outcome.logs != expected_logs
    {
        panic!(
            "log mismatch in scenario '{}'\npath: {}\n{}",
            scenario.name,
            path.display(),
            diff_lines(expected_logs, &outcome.logs)
        );
    }
    if let Some(expected_host) = &scenario.expect_host
        && &outcome.host_calls != expected_host
    {
        panic!(
            "host call mismatch in scenario '{}'\npath: {}\n{}",
            scenario.name,
            path.display(),
            diff_lines(expected_host, &outcome.host_calls)
        );
    }
    assert_eq!(
        outcome.still_down,
        scenario.expect_down,
        "pointers left down in scenario '{}' ({})",
        scenario.name,
        path.display()
    );
}

#[test]
fn fixture_scenarios() {
    let filter = scenario_filter();
    let mut ran = 0usize;
    for (path, scenario) in load_scenarios_in(&fixtures_dir()) {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if let Some(filter) = &filter
            && !file_name.contains(filter.as_str())
        {
            continue;
        }
        ran += 1;
        let outcome = run_scenario(&scenario);
        enforce_expected(&path, &scenario, &outcome);
    }
    assert!(ran > 0, "no scenarios matched filter");
}

#[test]
fn every_fixture_obeys_the_lifecycle() {
    for (path, scenario) in load_scenarios_in(&fixtures_dir()) {
        let outcome = run_scenario(&scenario);
        let still_down = pointer_core::test_harness::check_lifecycle(&outcome.lines)
            .unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        let expected: Vec<String> = scenario.expect_down.iter().map(u64::to_string).collect();
        assert_eq!(still_down, expected, "{}", path.display());
    }
}

#[test]
fn unsupported_host_consumes_nothing() {
    let path = fixtures_dir().join("unsupported.toml");
    let scenario = pointer_test_support::load_scenario(&path);
    let outcome = run_scenario(&scenario);
    assert!(outcome.handled.iter().all(|h| *h == Handled::Ignored));
}

#[test]
fn idle_hover_is_not_consumed() {
    let path = fixtures_dir().join("clamp_to_track.toml");
    let mut scenario = pointer_test_support::load_scenario(&path);
    // Drop the initial mousedown: every move is now a hover.
    scenario.events.remove(0);
    let outcome = run_scenario(&scenario);
    assert!(outcome.lines.is_empty());
    assert_eq!(outcome.handled[0], Handled::Ignored);
    // The trailing mouseup is still part of the model and is consumed.
    assert_eq!(outcome.handled.last(), Some(&Handled::Consumed));
}
