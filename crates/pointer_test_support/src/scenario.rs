//! Declarative event scripts with expected callback output.
//!
//! A scenario names a host flavour and surface geometry, lists raw events by
//! their platform names, and records the exact `begin`/`extend`/`end` lines
//! the tracker must produce. Scenarios may be written in TOML or JSON.

use std::fs;
use std::path::{Path, PathBuf};

use pointer_core::test_harness::{FakeHost, RecordingSink};
use pointer_core::{Handled, Point, PointerReport, PointerTracker, Position, RawEvent, RawEventKind};
use serde::Deserialize;

pub const SCENARIO_FORMAT_V1: &str = "pointer-scenario-v1";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioHost {
    UnifiedPointer,
    TouchAndMouse,
    TouchAndMouseDocument,
    LegacyMouse,
    Unsupported,
}

impl ScenarioHost {
    fn build(self) -> FakeHost {
        match self {
            ScenarioHost::UnifiedPointer => FakeHost::unified_pointer(),
            ScenarioHost::TouchAndMouse => FakeHost::touch_and_mouse(),
            ScenarioHost::TouchAndMouseDocument => FakeHost::touch_and_mouse_without_capture(),
            ScenarioHost::LegacyMouse => FakeHost::legacy_mouse(),
            ScenarioHost::Unsupported => FakeHost::unsupported(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEvent {
    /// Platform event name, e.g. `touchstart` or `MSPointerUp`.
    pub kind: String,
    /// Page position for mouse and unified pointer events.
    #[serde(default)]
    pub at: Option<[f32; 2]>,
    /// Target-offset position, for hosts without page coordinates.
    #[serde(default)]
    pub offset: Option<[f32; 2]>,
    #[serde(default)]
    pub pointer: Option<u64>,
    /// Changed touch contacts as `[identifier, x, y]`.
    #[serde(default)]
    pub touches: Vec<(u64, f32, f32)>,
    /// Move the target to this delta before delivering the event.
    #[serde(default)]
    pub relocate: Option<[f32; 2]>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub format: String,
    pub name: String,
    pub host: ScenarioHost,
    #[serde(default)]
    pub delta: [f32; 2],
    #[serde(default = "default_size")]
    pub size: [f32; 2],
    pub expect: Vec<String>,
    #[serde(default)]
    pub expect_logs: Option<Vec<String>>,
    #[serde(default)]
    pub expect_host: Option<Vec<String>>,
    #[serde(default)]
    pub expect_down: Vec<u64>,
    pub events: Vec<ScenarioEvent>,
}

fn default_size() -> [f32; 2] {
    [100.0, 100.0]
}

#[derive(Clone, Debug)]
pub struct ScenarioOutcome {
    pub lines: Vec<String>,
    pub logs: Vec<String>,
    pub host_calls: Vec<String>,
    pub still_down: Vec<u64>,
    pub handled: Vec<Handled>,
}

impl ScenarioEvent {
    fn to_raw(&self, scenario: &str) -> RawEvent {
        let kind = RawEventKind::from_name(&self.kind).unwrap_or_else(|| {
            panic!("scenario {scenario:?}: unknown event kind {:?}", self.kind)
        });
        if !self.touches.is_empty() {
            return RawEvent::touches(kind, &self.touches);
        }
        let position = match (self.at, self.offset) {
            (Some([x, y]), None) => Position::Page(Point::new(x, y)),
            (None, Some([x, y])) => Position::TargetOffset(Point::new(x, y)),
            _ => panic!(
                "scenario {scenario:?}: event {:?} needs exactly one of `at`, `offset` or `touches`",
                self.kind
            ),
        };
        RawEvent::new(
            kind,
            vec![PointerReport {
                identifier: None,
                pointer_id: self.pointer,
                position,
            }],
        )
    }
}

pub fn run_scenario(scenario: &Scenario) -> ScenarioOutcome {
    let host = scenario
        .host
        .build()
        .with_geometry(
            (scenario.delta[0], scenario.delta[1]),
            (scenario.size[0], scenario.size[1]),
        );
    let mut tracker = PointerTracker::attach(host, RecordingSink::default());
    let size = (scenario.size[0], scenario.size[1]);

    let mut handled = Vec::with_capacity(scenario.events.len());
    for event in &scenario.events {
        if let Some([dx, dy]) = event.relocate {
            tracker.host_mut().set_geometry((dx, dy), size);
        }
        handled.push(tracker.handle_event(&event.to_raw(&scenario.name)));
    }

    let still_down = tracker.active_ids().into_iter().map(u64::from).collect();
    let host_calls = tracker
        .host()
        .calls()
        .iter()
        .map(ToString::to_string)
        .collect();
    let sink = tracker.sink();
    ScenarioOutcome {
        lines: sink.lines().to_vec(),
        logs: sink.logs().to_vec(),
        host_calls,
        still_down,
        handled,
    }
}

pub fn load_scenario(path: &Path) -> Scenario {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenario {path:?}: {err}"));
    let scenario: Scenario = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse scenario TOML {path:?}: {err}")),
        Some("json") => serde_json::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse scenario JSON {path:?}: {err}")),
        other => panic!("unsupported scenario extension {other:?} for {path:?}"),
    };
    assert_eq!(
        scenario.format, SCENARIO_FORMAT_V1,
        "unsupported scenario format in {path:?}"
    );
    assert!(
        !scenario.events.is_empty(),
        "scenario {path:?} has no events"
    );
    scenario
}

/// Every `.toml` and `.json` scenario directly inside `dir`, sorted by path.
pub fn load_scenarios_in(dir: &Path) -> Vec<(PathBuf, Scenario)> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read scenario dir {dir:?}: {err}"));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("toml") | Some("json")
            )
        })
        .collect();
    paths.sort();
    paths
        .into_iter()
        .map(|p| {
            let scenario = load_scenario(&p);
            (p, scenario)
        })
        .collect()
}
