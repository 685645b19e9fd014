use super::process::ProcessId;
use serde::Serialize;
use std::{collections::VecDeque, fmt};
use time::{macros::format_description, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Created,
    ExecutedOneTick,
    Completed,
    Removed,
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogAction::Created => "Process created",
            LogAction::ExecutedOneTick => "Executed 1s",
            LogAction::Completed => "Process completed",
            LogAction::Removed => "Process removed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: u64,
    pub pid: ProcessId,
    pub action: LogAction,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl LogEntry {
    /// Wall-clock time of day, for display.
    pub fn time_of_day(&self) -> String {
        self.timestamp
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default()
    }
}

/// Bounded history of process lifecycle events, newest first.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl EventLog {
    pub const CAPACITY: usize = 15;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(EventLog::CAPACITY + 1),
            next_id: 1,
        }
    }

    pub fn record(&mut self, pid: ProcessId, action: LogAction) -> &LogEntry {
        let entry = LogEntry {
            id: self.next_id,
            pid,
            action,
            timestamp: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
        };
        self.next_id += 1;

        self.entries.push_front(entry);
        self.entries.truncate(EventLog::CAPACITY);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
