use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use etl_core::Msg;

/// What the stdin reader hands to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(Msg),
    ShowSource,
    Help,
    Quit,
    /// Stdin closed; quit once the current run has finished animating.
    EndOfInput,
}

pub fn parse_command(line: &str) -> Option<Inbound> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "restart" => Some(Inbound::Command(Msg::RestartClicked)),
        "e" | "export" => Some(Inbound::Command(Msg::ExportClicked)),
        "s" | "source" => Some(Inbound::ShowSource),
        "h" | "help" | "?" => Some(Inbound::Help),
        "q" | "quit" | "exit" => Some(Inbound::Quit),
        _ => None,
    }
}

pub fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            let inbound = parse_command(&line).unwrap_or(Inbound::Help);
            if tx.send(inbound).is_err() {
                return;
            }
        }
        let _ = tx.send(Inbound::EndOfInput);
    });
}
