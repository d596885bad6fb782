use etl_core::Launch;
use serde_json::{Map, Value};

/// Offline batch used whenever the live source cannot be read: one past
/// success, one past failure, one upcoming launch.
pub fn fallback_launches() -> Vec<Launch> {
    vec![
        demo(
            "demo-1",
            "Demo Mission Alpha",
            "2025-01-12T14:30:00.000Z",
            Some(true),
            false,
            "Falcon 9",
            "LC-39A",
        ),
        demo(
            "demo-2",
            "Demo Mission Beta",
            "2025-02-02T09:45:00.000Z",
            Some(false),
            false,
            "Falcon 9",
            "SLC-40",
        ),
        demo(
            "demo-3",
            "Demo Mission Gamma",
            "2025-03-05T18:00:00.000Z",
            Some(false),
            true,
            "Starship",
            "Starbase",
        ),
    ]
}

fn demo(
    id: &str,
    name: &str,
    date_utc: &str,
    success: Option<bool>,
    upcoming: bool,
    rocket: &str,
    launchpad: &str,
) -> Launch {
    let mut extra = Map::new();
    extra.insert("payloads".to_string(), Value::Array(Vec::new()));
    Launch {
        id: id.to_string(),
        name: name.to_string(),
        date_utc: Some(date_utc.to_string()),
        success,
        upcoming,
        rocket: Some(rocket.to_string()),
        launchpad: Some(launchpad.to_string()),
        extra,
    }
}
