use crate::model::{Launch, Metrics, NO_MISSION};

/// Derives aggregate counts over one batch.
///
/// `rows_out` and `upcoming` are counted independently: a launch flagged both
/// successful and upcoming contributes to both.
pub fn compute_metrics(launches: &[Launch]) -> Metrics {
    let rows_in = launches.len();
    let rows_out = launches.iter().filter(|launch| launch.is_success()).count();
    let upcoming = launches.iter().filter(|launch| launch.upcoming).count();
    let last_mission = launches
        .last()
        .map(|launch| launch.name.clone())
        .unwrap_or_else(|| NO_MISSION.to_string());

    Metrics {
        rows_in,
        rows_out,
        dedup_removed: rows_in - rows_out,
        upcoming,
        last_mission,
    }
}
