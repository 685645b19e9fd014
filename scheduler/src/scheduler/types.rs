use super::process::{Process, ProcessId, ProcessKind};
use std::str::FromStr;
use thiserror::Error;

pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(ProcessId),
}

/// Parameters of a process still to be created, as typed by a user.
///
/// Accepts `priority:kind:burst` or the same fields separated by whitespace,
/// e.g. `2:cpu:5` or `2 io 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub priority: u8,
    pub kind: ProcessKind,
    pub burst_time: u32,
}

impl FromStr for ProcessSpec {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();

        let [priority, kind, burst] = fields.as_slice() else {
            return Err(SimulationError::InvalidInput(format!(
                "expected \"priority kind burst\", got \"{}\"",
                s.trim()
            )));
        };

        let priority = priority
            .parse::<u8>()
            .map_err(|_| SimulationError::InvalidInput(format!("invalid priority \"{priority}\"")))
            .and_then(Process::validate_priority)?;
        let kind = kind.parse()?;
        let burst_time = burst.parse::<u32>().map_err(|_| {
            SimulationError::InvalidInput(format!(
                "burst time must be a non-negative integer, got \"{burst}\""
            ))
        })?;

        Ok(Self {
            priority,
            kind,
            burst_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_colon_separated() {
        assert_eq!(
            "2:cpu:5".parse::<ProcessSpec>().unwrap(),
            ProcessSpec {
                priority: 2,
                kind: ProcessKind::CpuBound,
                burst_time: 5,
            }
        );
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let spec: ProcessSpec = "  4  io-bound 0 ".parse().unwrap();
        assert_eq!(spec.kind, ProcessKind::IoBound);
        assert_eq!(spec.burst_time, 0);
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        for input in ["5:cpu:3", "0 io 3", "1 cpu -3", "1 cpu 2.5", "1 disk 3", "1 cpu", ""] {
            assert!(
                matches!(input.parse::<ProcessSpec>(), Err(SimulationError::InvalidInput(_))),
                "{input} should be rejected"
            );
        }
    }
}
