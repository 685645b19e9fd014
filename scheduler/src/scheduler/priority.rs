use super::{Process, Scheduler};

/// Multi-level queue selection: scans priority levels 1 to 4 and picks the
/// earliest-created waiting process of the first non-empty level.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn new() -> Self {
        PriorityScheduler
    }
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority Scheduler";

    fn select(&self, processes: &[Process]) -> Option<usize> {
        // min_by_key keeps the first of equal keys, so ties go to creation order
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.is_waiting())
            .min_by_key(|(_, process)| process.priority())
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ProcessKind, ProcessRegistry};

    #[test]
    fn test_lowest_level_first() {
        let mut registry = ProcessRegistry::new();
        registry.create(3, ProcessKind::CpuBound, 1).unwrap();
        registry.create(2, ProcessKind::CpuBound, 1).unwrap();
        registry.create(2, ProcessKind::IoBound, 1).unwrap();

        assert_eq!(PriorityScheduler::new().select(registry.all()), Some(1));
    }

    #[test]
    fn test_only_waiting_candidates() {
        let mut registry = ProcessRegistry::new();
        let urgent = registry.create(1, ProcessKind::CpuBound, 1).unwrap().id();
        registry.create(4, ProcessKind::CpuBound, 1).unwrap();
        registry.force_finish(urgent).unwrap();

        assert_eq!(PriorityScheduler::new().select(registry.all()), Some(1));
        assert_eq!(PriorityScheduler::new().select(&registry.all()[..1]), None);
    }
}
