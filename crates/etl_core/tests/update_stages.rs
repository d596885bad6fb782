mod common;

use common::{demo_run, init_logging, live_run};
use etl_core::{update, Effect, Msg, PipelineState, StageSchedule, StageStatus};
use pretty_assertions::assert_eq;

fn statuses(state: &PipelineState) -> Vec<StageStatus> {
    state.view().stages.iter().map(|pill| pill.status).collect()
}

fn fire(state: PipelineState, run_id: u64, step: usize) -> PipelineState {
    let (state, effects) = update(state, Msg::StageTimerFired { run_id, step });
    assert!(effects.is_empty());
    state
}

#[test]
fn loaded_run_starts_in_initial_state_and_arms_timers() {
    init_logging();
    let (mut state, effects) = update(PipelineState::new(), Msg::RunLoaded(live_run(&["A"])));

    assert_eq!(
        effects,
        vec![Effect::ArmStageTimers {
            run_id: 1,
            schedule: StageSchedule::default(),
        }]
    );
    assert_eq!(
        statuses(&state),
        vec![StageStatus::Active, StageStatus::Pending, StageStatus::Pending]
    );
    assert!(state.view().log_lines.is_empty());
    assert!(state.consume_dirty());
    assert!(!state.stages_finished());
}

#[test]
fn full_schedule_walks_stages_and_fills_log() {
    init_logging();
    let (state, _) = update(PipelineState::new(), Msg::RunLoaded(live_run(&["A", "B", "C"])));

    let state = fire(state, 1, 0);
    assert_eq!(
        state.view().log_lines,
        vec!["Extract ▸ fetched 3 launches (api.spacexdata.com)".to_string()]
    );

    let state = fire(state, 1, 1);
    assert_eq!(
        statuses(&state),
        vec![StageStatus::Done, StageStatus::Active, StageStatus::Pending]
    );
    assert_eq!(
        state.view().log_lines[1],
        "Transform ▸ kept 2 successful missions, removed 1"
    );

    let state = fire(state, 1, 2);
    assert_eq!(
        statuses(&state),
        vec![StageStatus::Done, StageStatus::Done, StageStatus::Active]
    );
    assert_eq!(state.view().log_lines[2], "Load ▸ data ready. Last mission: C");

    let state = fire(state, 1, 3);
    assert_eq!(statuses(&state), vec![StageStatus::Done; 3]);
    assert_eq!(state.view().log_lines.len(), 3);
    assert!(state.stages_finished());

    // Terminal state holds.
    let state = fire(state, 1, 3);
    assert_eq!(statuses(&state), vec![StageStatus::Done; 3]);
}

#[test]
fn extract_line_reports_demo_data_on_fallback() {
    init_logging();
    let (state, _) = update(PipelineState::new(), Msg::RunLoaded(demo_run()));
    let state = fire(state, 1, 0);
    assert_eq!(
        state.view().log_lines,
        vec!["Extract ▸ fetched 3 launches (demo data)".to_string()]
    );
}

#[test]
fn new_run_discards_pending_steps_of_previous_run() {
    init_logging();
    let (state, _) = update(PipelineState::new(), Msg::RunLoaded(live_run(&["Old"])));
    let state = fire(state, 1, 0);
    let state = fire(state, 1, 1);

    let (state, _) = update(state, Msg::RestartClicked);
    let (mut state, effects) = update(state, Msg::RestartFinished(Ok(demo_run())));
    assert_eq!(
        effects,
        vec![Effect::ArmStageTimers {
            run_id: 2,
            schedule: StageSchedule::default(),
        }]
    );
    assert_eq!(
        statuses(&state),
        vec![StageStatus::Active, StageStatus::Pending, StageStatus::Pending]
    );
    assert!(state.view().log_lines.is_empty());
    assert!(state.consume_dirty());

    // Late timers from run 1 fire against run 2.
    let mut state = fire(state, 1, 2);
    assert!(!state.consume_dirty());
    let mut state = fire(state, 1, 3);
    assert!(!state.consume_dirty());
    assert_eq!(
        statuses(&state),
        vec![StageStatus::Active, StageStatus::Pending, StageStatus::Pending]
    );
    assert!(state.view().log_lines.is_empty());

    let state = fire(state, 2, 0);
    let view = state.view();
    assert_eq!(view.log_lines.len(), 1);
    assert!(view.log_lines[0].contains("demo data"));
    assert!(!view.log_lines.iter().any(|line| line.contains("Old")));
}

#[test]
fn stage_timer_before_any_run_is_ignored() {
    init_logging();
    let state = PipelineState::new();
    let next = fire(state.clone(), 0, 0);
    assert_eq!(next, state);
}

#[test]
fn custom_schedule_is_passed_to_timer_effect() {
    init_logging();
    let schedule = StageSchedule {
        offsets: [
            std::time::Duration::from_millis(1),
            std::time::Duration::from_millis(2),
            std::time::Duration::from_millis(3),
            std::time::Duration::from_millis(4),
        ],
    };
    let (_, effects) = update(
        PipelineState::with_schedule(schedule),
        Msg::RunLoaded(live_run(&["A"])),
    );
    assert_eq!(effects, vec![Effect::ArmStageTimers { run_id: 1, schedule }]);
}
