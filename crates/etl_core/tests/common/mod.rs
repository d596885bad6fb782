#![allow(dead_code)]

use std::sync::Once;

use chrono::{TimeZone, Utc};
use etl_core::{Launch, RunResult};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn launch(id: &str, name: &str, success: Option<bool>, upcoming: bool) -> Launch {
    Launch {
        id: id.to_string(),
        name: name.to_string(),
        date_utc: Some("2025-01-01T00:00:00.000Z".to_string()),
        success,
        upcoming,
        rocket: Some("Falcon 9".to_string()),
        launchpad: Some("LC-39A".to_string()),
        extra: Default::default(),
    }
}

pub fn live_run(names: &[&str]) -> RunResult {
    let launches = names
        .iter()
        .enumerate()
        .map(|(idx, name)| launch(&format!("l{idx}"), name, Some(idx % 2 == 0), false))
        .collect();
    RunResult::new(
        launches,
        "https://api.spacexdata.com/v5/launches",
        false,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    )
}

pub fn demo_run() -> RunResult {
    RunResult::new(
        vec![
            launch("demo-1", "Alpha", Some(true), false),
            launch("demo-2", "Beta", Some(false), false),
            launch("demo-3", "Gamma", Some(false), true),
        ],
        "https://api.spacexdata.com/v5/launches",
        true,
        Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
    )
}
