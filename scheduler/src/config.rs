use crate::scheduler::ProcessSpec;
use clap::{Parser, ValueEnum};
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Earliest-created waiting process runs first
    CreationOrder,
    /// Lowest priority level first, creation order within a level
    Priority,
}

/// Multi-level queue scheduler simulation.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Wall-clock milliseconds between scheduler ticks
    #[arg(
        long,
        env = "MLQ_TICK_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Process selection policy
    #[arg(long, env = "MLQ_POLICY", value_enum, default_value_t = Policy::CreationOrder)]
    pub policy: Policy,

    /// Create a process at start-up, e.g. `2:cpu:5` (repeatable)
    #[arg(long, value_name = "PRIORITY:TYPE:BURST")]
    pub spawn: Vec<ProcessSpec>,

    /// Run without the terminal UI and print the final state as JSON
    #[arg(long)]
    pub headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 0)]
    pub ticks: u32,

    /// Write logs to this file
    #[arg(long, env = "MLQ_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(
        long,
        env = "MLQ_TRACE_JSON",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub trace_json: bool,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
