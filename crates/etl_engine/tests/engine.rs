use std::time::Duration;

use etl_core::StageSchedule;
use etl_engine::{EngineConfig, EngineEvent, EngineHandle};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    engine_logging::initialize_for_tests();
}

async fn launch_server(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/launches"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(delay)
                .set_body_json(json!([
                    { "id": "a", "name": "Alpha", "success": true, "upcoming": false },
                    { "id": "b", "name": "Beta", "success": false, "upcoming": false }
                ])),
        )
        .mount(&server)
        .await;
    server
}

fn engine_for(server: &MockServer, export_dir: std::path::PathBuf) -> EngineHandle {
    let mut config = EngineConfig::default_with_export_dir(export_dir);
    config.source_url = Some(format!("{}/launches", server.uri()));
    EngineHandle::new(config)
}

#[tokio::test(flavor = "multi_thread")]
async fn load_arm_and_export_round_trip() {
    init_logging();
    let server = launch_server(Duration::ZERO).await;
    let temp = tempfile::TempDir::new().unwrap();
    let engine = engine_for(&server, temp.path().to_path_buf());

    engine.load();
    let run = match engine.recv_timeout(WAIT) {
        Some(EngineEvent::RunLoaded(run)) => run,
        other => panic!("expected RunLoaded, got {other:?}"),
    };
    assert!(!run.fallback_used);
    assert_eq!(run.metrics.rows_in, 2);
    assert_eq!(run.metrics.last_mission, "Beta");

    let schedule = StageSchedule {
        offsets: [
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(15),
            Duration::from_millis(20),
        ],
    };
    engine.arm_stages(1, schedule);
    let mut steps = Vec::new();
    while steps.len() < 4 {
        match engine.recv_timeout(WAIT) {
            Some(EngineEvent::StageTimerFired { run_id, step }) => steps.push((run_id, step)),
            other => panic!("expected StageTimerFired, got {other:?}"),
        }
    }
    assert_eq!(steps, vec![(1, 0), (1, 1), (1, 2), (1, 3)]);

    engine.export(run.launches.clone());
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::ExportCompleted(Ok(summary))) => {
            assert_eq!(summary.rows, 2);
            assert!(summary.path.starts_with(temp.path()));
            assert!(summary.path.exists());
        }
        other => panic!("expected ExportCompleted, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn second_restart_while_in_flight_is_ignored() {
    init_logging();
    let server = launch_server(Duration::from_millis(400)).await;
    let temp = tempfile::TempDir::new().unwrap();
    let engine = engine_for(&server, temp.path().to_path_buf());

    engine.restart();
    engine.restart();

    let first = engine.recv_timeout(WAIT);
    let second = engine.recv_timeout(WAIT);
    assert!(matches!(first, Some(EngineEvent::RestartIgnored)));
    match second {
        Some(EngineEvent::RestartCompleted(Ok(run))) => assert_eq!(run.launches.len(), 2),
        other => panic!("expected RestartCompleted, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 1);
}
