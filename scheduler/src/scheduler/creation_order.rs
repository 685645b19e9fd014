use super::{Process, Scheduler};

/// Picks the earliest-created waiting process.
///
/// Because a running process is returned to the pool before every selection,
/// the first unfinished process keeps the CPU until it completes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreationOrderScheduler;

impl CreationOrderScheduler {
    pub fn new() -> Self {
        CreationOrderScheduler
    }
}

impl Scheduler for CreationOrderScheduler {
    const NAME: &'static str = "Creation Order Scheduler";

    fn select(&self, processes: &[Process]) -> Option<usize> {
        processes.iter().position(Process::is_waiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ProcessKind, ProcessRegistry};

    #[test]
    fn test_ignores_priority() {
        let mut registry = ProcessRegistry::new();
        registry.create(4, ProcessKind::CpuBound, 1).unwrap();
        registry.create(1, ProcessKind::CpuBound, 1).unwrap();

        assert_eq!(CreationOrderScheduler::new().select(registry.all()), Some(0));
    }

    #[test]
    fn test_skips_finished() {
        let mut registry = ProcessRegistry::new();
        let first = registry.create(1, ProcessKind::CpuBound, 1).unwrap().id();
        registry.create(1, ProcessKind::IoBound, 1).unwrap();
        registry.force_finish(first).unwrap();

        assert_eq!(CreationOrderScheduler::new().select(registry.all()), Some(1));
    }

    #[test]
    fn test_nothing_waiting() {
        assert_eq!(CreationOrderScheduler::new().select(&[]), None);
    }
}
