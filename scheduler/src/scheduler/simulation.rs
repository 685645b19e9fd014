use super::{
    clock::Ticker,
    events::{EventLog, LogAction, LogEntry},
    process::{Process, ProcessId, ProcessKind, ProcessStatus},
    queues::QueueView,
    registry::ProcessRegistry,
    ProcessSpec, Scheduler, SimulationResult,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a tick that executed a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub pid: ProcessId,
    pub action: LogAction,
    pub remaining_time: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub waiting: usize,
    pub running: usize,
    pub finished: usize,
    pub ticks_executed: u64,
    pub average_wait: f64,
    pub average_finished_wait: f64,
}

impl Stats {
    pub fn from_processes(processes: &[Process], ticks_executed: u64) -> Self {
        let count = |status: ProcessStatus| {
            processes
                .iter()
                .filter(|process| process.status() == status)
                .count()
        };
        let average = |waits: Vec<u32>| {
            if waits.is_empty() {
                0.0
            } else {
                waits.iter().map(|&wait| wait as f64).sum::<f64>() / waits.len() as f64
            }
        };

        Self {
            total: processes.len(),
            waiting: count(ProcessStatus::Waiting),
            running: count(ProcessStatus::Running),
            finished: count(ProcessStatus::Finished),
            ticks_executed,
            average_wait: average(processes.iter().map(Process::wait_time).collect()),
            average_finished_wait: average(
                processes
                    .iter()
                    .filter(|process| process.status() == ProcessStatus::Finished)
                    .map(Process::wait_time)
                    .collect(),
            ),
        }
    }
}

/// Read-only copy of the whole simulation state, handed to presentation.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub scheduler: &'static str,
    pub running: bool,
    pub processes: Vec<Process>,
    pub queues: QueueView,
    pub log: Vec<LogEntry>,
    pub stats: Stats,
}

impl Snapshot {
    pub fn current_process(&self) -> Option<&Process> {
        self.processes
            .iter()
            .find(|process| process.status() == ProcessStatus::Running)
    }

    /// Waiting processes across all levels, in creation order.
    pub fn waiting_processes(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter().filter(|process| process.is_waiting())
    }
}

/// Owns every piece of mutable simulation state. All commands and ticks go
/// through `&mut self`, so they are serialized by construction.
#[derive(Debug)]
pub struct Simulation<S> {
    scheduler: S,
    registry: ProcessRegistry,
    log: EventLog,
    ticker: Ticker,
    ticks_executed: u64,
}

impl<S: Scheduler> Simulation<S> {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(scheduler: S) -> Self {
        Self::with_interval(scheduler, Self::DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(scheduler: S, interval: Duration) -> Self {
        info!(scheduler = S::NAME, ?interval, "Simulation initialized");
        Self {
            scheduler,
            registry: ProcessRegistry::new(),
            log: EventLog::new(),
            ticker: Ticker::new(interval),
            ticks_executed: 0,
        }
    }

    pub fn create_process(
        &mut self,
        priority: u8,
        kind: ProcessKind,
        burst_time: u32,
    ) -> SimulationResult<ProcessId> {
        let pid = match self.registry.create(priority, kind, burst_time) {
            Ok(process) => process.id(),
            Err(e) => {
                warn!(error = %e, "Rejected process creation");
                return Err(e);
            }
        };
        self.log.record(pid, LogAction::Created);
        info!(%pid, priority, %kind, burst_time, "Process created");
        Ok(pid)
    }

    pub fn create_from_spec(&mut self, spec: ProcessSpec) -> SimulationResult<ProcessId> {
        self.create_process(spec.priority, spec.kind, spec.burst_time)
    }

    pub fn remove_process(&mut self, pid: ProcessId) -> SimulationResult<()> {
        if let Err(e) = self.registry.force_finish(pid) {
            warn!(error = %e, "Rejected process removal");
            return Err(e);
        }
        self.log.record(pid, LogAction::Removed);
        info!(%pid, "Process removed");
        Ok(())
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.ticker.start(now) {
            info!("Simulation started");
        }
    }

    pub fn pause(&mut self) {
        if self.ticker.pause() {
            info!("Simulation paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn tick_interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Runs one tick if the clock is running and its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.ticker.poll(now) {
            self.tick()
        } else {
            None
        }
    }

    /// Advances simulated time by one unit, regardless of the clock state.
    ///
    /// Returns `None` when no process was waiting, in which case nothing
    /// changed.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let processes = self.registry.all_mut();

        for process in processes.iter_mut() {
            process.demote();
        }

        let Some(selected) = self.scheduler.select(processes) else {
            debug!("Tick skipped, no process waiting");
            return None;
        };

        let process = &mut processes[selected];
        let pid = process.id();
        let action = match process.execute_one_tick() {
            ProcessStatus::Finished => LogAction::Completed,
            _ => LogAction::ExecutedOneTick,
        };
        let remaining_time = process.remaining_time();

        for process in processes.iter_mut() {
            process.accrue_wait();
        }

        self.ticks_executed += 1;
        self.log.record(pid, action);
        match action {
            LogAction::Completed => info!(%pid, "Process completed"),
            _ => debug!(%pid, remaining_time, "Process executed one tick"),
        }

        Some(TickOutcome {
            pid,
            action,
            remaining_time,
        })
    }

    pub fn process(&self, pid: ProcessId) -> Option<&Process> {
        self.registry.get(pid)
    }

    pub fn processes(&self) -> &[Process] {
        self.registry.all()
    }

    pub fn queues(&self) -> QueueView {
        QueueView::from_processes(self.registry.all())
    }

    pub fn log(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.entries()
    }

    pub fn stats(&self) -> Stats {
        Stats::from_processes(self.registry.all(), self.ticks_executed)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            scheduler: S::NAME,
            running: self.is_running(),
            processes: self.registry.all().to_vec(),
            queues: self.queues(),
            log: self.log.entries().cloned().collect(),
            stats: self.stats(),
        }
    }

    /// Stops the clock and hands back the final state.
    pub fn shutdown(mut self) -> Snapshot {
        self.pause();
        let snapshot = self.snapshot();
        info!(
            processes = snapshot.stats.total,
            finished = snapshot.stats.finished,
            ticks = snapshot.stats.ticks_executed,
            "Simulation shut down"
        );
        snapshot
    }
}
