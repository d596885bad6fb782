use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use etl_core::{update, Msg, PipelineState};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{spawn_stdin_reader, Inbound};
use super::logging;
use super::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::initialize(config.log_destination);
    engine_info!(
        "Starting mini-ETL; source override: {:?}, restart route: {:?}",
        config.engine.source_url,
        config.engine.restart_route
    );

    let (input_tx, input_rx) = mpsc::channel::<Inbound>();
    spawn_stdin_reader(input_tx);

    let runner = EffectRunner::new(config.engine);
    runner.start();

    let mut app = App::new(runner);
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", ui::render::HELP)?;
    app.render(&mut stdout)?;

    loop {
        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Inbound::Command(msg)) => app.dispatch(msg),
            Ok(Inbound::ShowSource) => app.show_source(&mut stdout)?,
            Ok(Inbound::Help) => writeln!(stdout, "{}", ui::render::HELP)?,
            Ok(Inbound::Quit) => break,
            Ok(Inbound::EndOfInput) => app.quit_when_idle = true,
            Err(RecvTimeoutError::Disconnected) => {
                app.quit_when_idle = true;
                thread::sleep(POLL_INTERVAL);
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        app.process_engine_events();
        app.render_if_dirty(&mut stdout)?;

        if app.quit_when_idle && app.is_idle() {
            break;
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

struct App {
    state: PipelineState,
    runner: EffectRunner,
    quit_when_idle: bool,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: PipelineState::new(),
            runner,
            quit_when_idle: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn process_engine_events(&mut self) {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg);
        }
    }

    /// Nothing left to animate and no restart in flight.
    fn is_idle(&self) -> bool {
        self.state.stages_finished() && !self.state.is_restarting()
    }

    fn render_if_dirty(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.state.consume_dirty() {
            self.render(out)?;
        }
        Ok(())
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", ui::render::render(&self.state.view()))?;
        out.flush()
    }

    fn show_source(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(run) = self.state.run() else {
            return writeln!(out, "No batch loaded yet.");
        };
        match run.raw_payload_pretty() {
            Ok(json) => writeln!(out, "Raw JSON payload:\n{json}"),
            Err(err) => {
                engine_warn!("Could not render raw payload: {}", err);
                writeln!(out, "Raw payload unavailable: {err}")
            }
        }
    }
}
