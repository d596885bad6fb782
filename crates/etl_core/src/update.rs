use crate::{Effect, Msg, PipelineState, RunResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PipelineState, msg: Msg) -> (PipelineState, Vec<Effect>) {
    let effects = match msg {
        Msg::RunLoaded(run) => {
            // A restart result already superseded the initial load.
            if state.run().is_some() {
                Vec::new()
            } else {
                vec![accept(&mut state, run)]
            }
        }
        Msg::RestartClicked => {
            if state.run().is_some() && state.begin_restart() {
                vec![Effect::Restart]
            } else {
                Vec::new()
            }
        }
        Msg::RestartFinished(Ok(run)) => {
            state.end_restart();
            vec![accept(&mut state, run)]
        }
        Msg::RestartFinished(Err(reason)) => {
            // Previous run, metrics and stages stay as they were.
            state.end_restart();
            state.push_log(format!("⚠ Restart failed: {reason}"));
            Vec::new()
        }
        Msg::RestartIgnored => {
            state.end_restart();
            Vec::new()
        }
        Msg::StageTimerFired { run_id, step } => {
            state.apply_stage_step(run_id, step);
            Vec::new()
        }
        Msg::ExportClicked => match state.run() {
            Some(run) => vec![Effect::ExportCsv {
                launches: run.launches.clone(),
            }],
            None => Vec::new(),
        },
        Msg::ExportFinished(Ok(receipt)) => {
            state.push_log(format!("📤 Exported {} rows to CSV", receipt.rows));
            Vec::new()
        }
        Msg::ExportFinished(Err(reason)) => {
            state.push_log(format!("⚠ Export failed: {reason}"));
            Vec::new()
        }
    };

    (state, effects)
}

fn accept(state: &mut PipelineState, run: RunResult) -> Effect {
    let run_id = state.accept_run(run);
    Effect::ArmStageTimers {
        run_id,
        schedule: state.schedule(),
    }
}
