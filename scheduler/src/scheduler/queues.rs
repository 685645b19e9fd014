use super::process::Process;
use serde::Serialize;

const LEVELS: usize = Process::MAX_PRIORITY as usize;

/// Waiting processes grouped by priority level, for display only.
///
/// Built fresh from a registry snapshot; holds copies so it can outlive the
/// borrow it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueView {
    buckets: [Vec<Process>; LEVELS],
}

impl QueueView {
    pub const LEVELS: usize = LEVELS;

    pub fn from_processes(processes: &[Process]) -> Self {
        let mut view = QueueView::default();
        for process in processes.iter().filter(|process| process.is_waiting()) {
            view.buckets[process.priority() as usize - 1].push(process.clone());
        }
        view
    }

    /// Processes queued at `priority` (1..=4), in creation order.
    pub fn bucket(&self, priority: u8) -> &[Process] {
        priority
            .checked_sub(1)
            .and_then(|level| self.buckets.get(level as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn levels(&self) -> impl Iterator<Item = (u8, &[Process])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(level, bucket)| (level as u8 + 1, bucket.as_slice()))
    }

    pub fn waiting_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{process::ProcessKind, registry::ProcessRegistry};
    use pretty_assertions::assert_eq;

    fn ids(bucket: &[Process]) -> Vec<String> {
        bucket.iter().map(|process| process.id().to_string()).collect()
    }

    #[test]
    fn test_groups_waiting_by_priority() {
        let mut registry = ProcessRegistry::new();
        registry.create(2, ProcessKind::CpuBound, 1).unwrap();
        registry.create(1, ProcessKind::IoBound, 1).unwrap();
        registry.create(2, ProcessKind::IoBound, 1).unwrap();
        registry.create(4, ProcessKind::CpuBound, 1).unwrap();

        let view = QueueView::from_processes(registry.all());
        assert_eq!(ids(view.bucket(1)), vec!["P002"]);
        assert_eq!(ids(view.bucket(2)), vec!["P001", "P003"]);
        assert!(view.bucket(3).is_empty());
        assert_eq!(ids(view.bucket(4)), vec!["P004"]);
        assert_eq!(view.waiting_count(), 4);
    }

    #[test]
    fn test_excludes_non_waiting() {
        let mut registry = ProcessRegistry::new();
        let id = registry.create(3, ProcessKind::CpuBound, 2).unwrap().id();
        registry.create(3, ProcessKind::CpuBound, 2).unwrap();
        registry.force_finish(id).unwrap();

        let view = QueueView::from_processes(registry.all());
        assert_eq!(ids(view.bucket(3)), vec!["P002"]);
    }

    #[test]
    fn test_out_of_range_bucket_is_empty() {
        let view = QueueView::default();
        assert!(view.bucket(0).is_empty());
        assert!(view.bucket(5).is_empty());
        assert_eq!(view.levels().count(), QueueView::LEVELS);
    }
}
