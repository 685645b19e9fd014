use super::{
    process::{Process, ProcessId, ProcessKind},
    SimulationError, SimulationResult,
};
use std::collections::HashMap;

/// Append-only store of every process created during a session.
///
/// Processes keep their creation order and are never removed; finishing a
/// process only changes its status.
#[derive(Debug)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    index: HashMap<ProcessId, usize>,
    next_id: u32,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn create(
        &mut self,
        priority: u8,
        kind: ProcessKind,
        burst_time: u32,
    ) -> SimulationResult<&Process> {
        let priority = Process::validate_priority(priority)?;

        let id = ProcessId::new(self.next_id);
        self.next_id += 1;

        let position = self.processes.len();
        self.processes.push(Process::new(id, priority, kind, burst_time));
        self.index.insert(id, position);
        Ok(&self.processes[position])
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.index.get(&id).map(|&position| &self.processes[position])
    }

    pub fn force_finish(&mut self, id: ProcessId) -> SimulationResult<&Process> {
        let position = *self
            .index
            .get(&id)
            .ok_or(SimulationError::ProcessNotFound(id))?;
        let process = &mut self.processes[position];
        process.force_finish();
        Ok(&*process)
    }

    /// Every process, in creation order.
    pub fn all(&self) -> &[Process] {
        &self.processes
    }

    pub(super) fn all_mut(&mut self) -> &mut [Process] {
        &mut self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::process::ProcessStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut registry = ProcessRegistry::new();
        let a = registry.create(1, ProcessKind::CpuBound, 3).unwrap().id();
        let b = registry.create(4, ProcessKind::IoBound, 2).unwrap().id();

        assert_eq!(a.to_string(), "P001");
        assert_eq!(b.to_string(), "P002");
        let order: Vec<_> = registry.all().iter().map(Process::id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_create_rejects_invalid_priority() {
        let mut registry = ProcessRegistry::new();
        assert!(matches!(
            registry.create(0, ProcessKind::CpuBound, 1),
            Err(SimulationError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.create(5, ProcessKind::CpuBound, 1),
            Err(SimulationError::InvalidInput(_))
        ));
        assert!(registry.is_empty());

        // Rejected calls do not consume ids.
        let id = registry.create(1, ProcessKind::CpuBound, 1).unwrap().id();
        assert_eq!(id, ProcessId::new(1));
    }

    #[test]
    fn test_new_process_defaults() {
        let mut registry = ProcessRegistry::new();
        let process = registry.create(3, ProcessKind::IoBound, 7).unwrap();

        assert_eq!(process.status(), ProcessStatus::Waiting);
        assert_eq!(process.remaining_time(), 7);
        assert_eq!(process.arrival_time(), 0);
        assert_eq!(process.wait_time(), 0);
    }

    #[test]
    fn test_get_and_force_finish() {
        let mut registry = ProcessRegistry::new();
        let id = registry.create(2, ProcessKind::CpuBound, 5).unwrap().id();

        assert!(registry.get(ProcessId::new(99)).is_none());
        assert_eq!(
            registry.force_finish(ProcessId::new(99)).unwrap_err(),
            SimulationError::ProcessNotFound(ProcessId::new(99))
        );

        let finished = registry.force_finish(id).unwrap();
        assert_eq!(finished.status(), ProcessStatus::Finished);
        assert_eq!(finished.remaining_time(), 5);
        assert_eq!(registry.len(), 1);
    }
}
