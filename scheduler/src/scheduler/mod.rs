mod clock;
mod creation_order;
mod display;
mod events;
mod priority;
mod process;
mod queues;
mod registry;
mod runner;
mod simulation;
mod types;

pub use creation_order::CreationOrderScheduler;
pub use events::{EventLog, LogAction, LogEntry};
pub use priority::PriorityScheduler;
pub use process::{Process, ProcessId, ProcessKind, ProcessStatus};
pub use queues::QueueView;
pub use registry::ProcessRegistry;
pub use runner::ProcessRunner;
pub use simulation::{Simulation, Snapshot, Stats, TickOutcome};
pub use types::{ProcessSpec, SimulationError, SimulationResult};

/// Selection step of a tick: decides which waiting process gets the CPU.
pub trait Scheduler {
    const NAME: &'static str;

    /// Index into `processes` (creation order) of the process to run next,
    /// or `None` if nothing is waiting.
    fn select(&self, processes: &[Process]) -> Option<usize>;
}
