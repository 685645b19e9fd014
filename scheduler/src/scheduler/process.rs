use super::{SimulationError, SimulationResult};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Process identifier, rendered as `P` followed by a zero-padded counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(u32);

impl ProcessId {
    pub fn new(counter: u32) -> Self {
        Self(counter)
    }

    pub fn counter(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:03}", self.0)
    }
}

impl FromStr for ProcessId {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('P')
            .or_else(|| s.strip_prefix('p'))
            .unwrap_or(s);
        digits
            .parse::<u32>()
            .map(ProcessId)
            .map_err(|_| SimulationError::InvalidInput(format!("malformed process id \"{s}\"")))
    }
}

impl Serialize for ProcessId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    CpuBound,
    IoBound,
}

impl ProcessKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessKind::CpuBound => "CPU-bound",
            ProcessKind::IoBound => "I/O-bound",
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProcessKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" | "cpu-bound" | "cpu_bound" => Ok(ProcessKind::CpuBound),
            "io" | "i/o" | "io-bound" | "i/o-bound" | "io_bound" => Ok(ProcessKind::IoBound),
            other => Err(SimulationError::InvalidInput(format!(
                "unknown process type \"{other}\""
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Waiting,
    Running,
    Finished,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProcessStatus::Waiting => "waiting",
            ProcessStatus::Running => "running",
            ProcessStatus::Finished => "finished",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    id: ProcessId,
    priority: u8,
    #[serde(rename = "type")]
    kind: ProcessKind,
    burst_time: u32,
    remaining_time: u32,
    arrival_time: u32,
    status: ProcessStatus,
    wait_time: u32,
}

impl Process {
    pub const MIN_PRIORITY: u8 = 1;
    pub const MAX_PRIORITY: u8 = 4;

    pub(super) fn new(id: ProcessId, priority: u8, kind: ProcessKind, burst_time: u32) -> Self {
        Self {
            id,
            priority,
            kind,
            burst_time,
            remaining_time: burst_time,
            arrival_time: 0,
            status: ProcessStatus::Waiting,
            wait_time: 0,
        }
    }

    pub fn validate_priority(priority: u8) -> SimulationResult<u8> {
        if (Process::MIN_PRIORITY..=Process::MAX_PRIORITY).contains(&priority) {
            Ok(priority)
        } else {
            Err(SimulationError::InvalidInput(format!(
                "priority {priority} is outside {}..={}",
                Process::MIN_PRIORITY,
                Process::MAX_PRIORITY
            )))
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn burst_time(&self) -> u32 {
        self.burst_time
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn wait_time(&self) -> u32 {
        self.wait_time
    }

    pub fn is_waiting(&self) -> bool {
        self.status == ProcessStatus::Waiting
    }

    /// Share of the burst already executed, in percent.
    pub fn progress(&self) -> f64 {
        if self.burst_time == 0 {
            return 100.0;
        }
        (self.burst_time - self.remaining_time) as f64 / self.burst_time as f64 * 100.0
    }

    pub fn progress_percentage(&self) -> String {
        format!("{}%", self.progress().round())
    }

    /// Puts a process that was granted the previous tick back into the pool.
    /// Returns true if the status changed.
    pub(super) fn demote(&mut self) -> bool {
        if self.status == ProcessStatus::Running && self.remaining_time > 0 {
            self.status = ProcessStatus::Waiting;
            true
        } else {
            false
        }
    }

    /// Runs the process for one simulated second.
    pub(super) fn execute_one_tick(&mut self) -> ProcessStatus {
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.status = if self.remaining_time == 0 {
            ProcessStatus::Finished
        } else {
            ProcessStatus::Running
        };
        self.status
    }

    pub(super) fn accrue_wait(&mut self) {
        if self.is_waiting() {
            self.wait_time += 1;
        }
    }

    pub(super) fn force_finish(&mut self) {
        self.status = ProcessStatus::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(burst: u32) -> Process {
        Process::new(ProcessId::new(1), 2, ProcessKind::CpuBound, burst)
    }

    #[test]
    fn test_id_formatting() {
        assert_eq!(ProcessId::new(1).to_string(), "P001");
        assert_eq!(ProcessId::new(42).to_string(), "P042");
        assert_eq!(ProcessId::new(1234).to_string(), "P1234");
    }

    #[test]
    fn test_id_parsing() {
        assert_eq!("P007".parse::<ProcessId>().unwrap(), ProcessId::new(7));
        assert_eq!(" p12 ".parse::<ProcessId>().unwrap(), ProcessId::new(12));
        assert!("Pxyz".parse::<ProcessId>().is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("CPU".parse::<ProcessKind>().unwrap(), ProcessKind::CpuBound);
        assert_eq!("I/O-bound".parse::<ProcessKind>().unwrap(), ProcessKind::IoBound);
        assert!(matches!(
            "gpu".parse::<ProcessKind>(),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_execute_until_finished() {
        let mut p = process(2);
        assert_eq!(p.execute_one_tick(), ProcessStatus::Running);
        assert_eq!(p.remaining_time(), 1);
        assert!(p.demote());
        assert_eq!(p.status(), ProcessStatus::Waiting);
        assert_eq!(p.execute_one_tick(), ProcessStatus::Finished);
        assert_eq!(p.remaining_time(), 0);
        assert!(!p.demote());
        assert_eq!(p.status(), ProcessStatus::Finished);
    }

    #[test]
    fn test_zero_burst_finishes_on_first_tick() {
        let mut p = process(0);
        assert_eq!(p.progress(), 100.0);
        assert_eq!(p.execute_one_tick(), ProcessStatus::Finished);
        assert_eq!(p.remaining_time(), 0);
    }

    #[test]
    fn test_wait_only_accrues_while_waiting() {
        let mut p = process(3);
        p.accrue_wait();
        p.execute_one_tick();
        p.accrue_wait();
        assert_eq!(p.wait_time(), 1);
    }

    #[test]
    fn test_progress_percentage() {
        let mut p = process(3);
        p.execute_one_tick();
        assert_eq!(p.progress_percentage(), "33%");
    }

    #[test]
    fn test_priority_bounds() {
        assert!(Process::validate_priority(0).is_err());
        assert!(Process::validate_priority(5).is_err());
        assert_eq!(Process::validate_priority(4).unwrap(), 4);
    }
}
