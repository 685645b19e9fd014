use std::{io, time::Instant};

use super::{display::DisplayTerminal, ProcessId, ProcessSpec, Scheduler, Simulation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerEvent {
    Quit,
    Toggle,
    Start,
    Pause,
    Step,
    Create(String),
    Remove(String),
    None,
}

/// Applies a user command to the simulation, returning a status message.
fn apply_event<S: Scheduler>(simulation: &mut Simulation<S>, event: RunnerEvent) -> Option<String> {
    match event {
        RunnerEvent::Toggle => simulation.toggle(),
        RunnerEvent::Start => simulation.start(),
        RunnerEvent::Pause => simulation.pause(),
        RunnerEvent::Step if !simulation.is_running() => {
            return Some(match simulation.tick() {
                Some(outcome) => format!("{}: {}", outcome.pid, outcome.action),
                None => "No process is waiting.".to_owned(),
            });
        }
        RunnerEvent::Create(input) => {
            let created = input
                .parse::<ProcessSpec>()
                .and_then(|spec| simulation.create_from_spec(spec));
            return Some(match created {
                Ok(pid) => format!("Created {pid}."),
                Err(e) => e.to_string(),
            });
        }
        RunnerEvent::Remove(input) => {
            let removed = input
                .parse::<ProcessId>()
                .and_then(|pid| simulation.remove_process(pid).map(|_| pid));
            return Some(match removed {
                Ok(pid) => format!("Removed {pid}."),
                Err(e) => e.to_string(),
            });
        }
        _ => {}
    }
    None
}

pub struct ProcessRunner<S> {
    terminal: DisplayTerminal,
    simulation: Simulation<S>,
    message: Option<String>,
}

impl<S: Scheduler> ProcessRunner<S> {
    pub fn new(simulation: Simulation<S>) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            simulation,
            message: None,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.simulation.poll(Instant::now());
        self.terminal.draw(
            &self.simulation.snapshot(),
            self.message.as_deref(),
            self.simulation.tick_interval(),
        )?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::None => {}
            event => {
                if let Some(message) = apply_event(&mut self.simulation, event) {
                    self.message = Some(message);
                }
            }
        }
        Ok(true)
    }

    pub fn into_simulation(self) -> Simulation<S> {
        self.simulation
    }
}
