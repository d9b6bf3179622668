mod display;
mod fcfs;
mod process;
mod quantum;
mod round_robin;
mod runner;
mod schedule;
mod sjf;
mod srtf;

use serde::Serialize;
use std::{collections::HashSet, fmt};

pub use crate::error::{ErrorKind, SchedulerError};
pub use fcfs::FcfsScheduler;
pub use process::{Process, ProcessRecord};
pub use quantum::{recommend_quantum, QuantumMethod};
pub use round_robin::RoundRobinScheduler;
pub use runner::ReplayRunner;
pub use schedule::{averages, Averages, Schedule, Slice};
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

/// Simulation clock unit.
pub type Time = u64;

pub trait Scheduler {
    const NAME: &'static str;

    fn algorithm(&self) -> Algorithm;

    /// Simulates the process list to completion on a private copy.
    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
    /// Shortest-Remaining-Time-First, preemptive.
    Srtf,
    /// Round Robin with a time quantum.
    #[value(name = "rr")]
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => FcfsScheduler::NAME,
            Algorithm::Sjf => SjfScheduler::NAME,
            Algorithm::Srtf => SrtfScheduler::NAME,
            Algorithm::RoundRobin => RoundRobinScheduler::NAME,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::Srtf | Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `algorithm` over `processes`. The quantum is only read for Round
/// Robin, where it is mandatory.
pub fn schedule(
    processes: &[Process],
    algorithm: Algorithm,
    quantum: Option<Time>,
) -> Result<Schedule, SchedulerError> {
    match algorithm {
        Algorithm::Fcfs => FcfsScheduler.run(processes),
        Algorithm::Sjf => SjfScheduler.run(processes),
        Algorithm::Srtf => SrtfScheduler.run(processes),
        Algorithm::RoundRobin => {
            let quantum = quantum.ok_or(SchedulerError::MissingQuantum)?;
            RoundRobinScheduler::new(quantum)?.run(processes)
        }
    }
}

/// Checks everything the algorithms rely on: a non-empty list, unique
/// positive pids, positive bursts, and a clock that cannot overflow `Time`
/// even if all the work starts after the last arrival.
pub fn validate(processes: &[Process]) -> Result<(), SchedulerError> {
    if processes.is_empty() {
        return Err(SchedulerError::NoProcesses);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.pid() == 0 {
            return Err(SchedulerError::InvalidPid);
        }
        if process.burst() == 0 {
            return Err(SchedulerError::ZeroBurst { pid: process.pid() });
        }
        if !seen.insert(process.pid()) {
            return Err(SchedulerError::DuplicatePid { pid: process.pid() });
        }
    }

    let last_arrival = processes.iter().map(Process::arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |clock, process| clock.checked_add(process.burst()))
        .ok_or(SchedulerError::TimeOverflow)?;
    Ok(())
}

/// Validates and returns a fresh working copy of `processes`.
fn working_copy(processes: &[Process]) -> Result<Vec<Process>, SchedulerError> {
    validate(processes)?;
    Ok(processes.iter().map(Process::reset).collect())
}
