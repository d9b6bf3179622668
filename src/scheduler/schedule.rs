use super::{Algorithm, Process, ProcessRecord, SchedulerError, Time};
use serde::Serialize;

/// One contiguous stretch of CPU time given to a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub pid: u32,
    pub start: Time,
    pub end: Time,
}

impl Slice {
    pub fn len(&self) -> Time {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
}

/// Mean waiting and turnaround time over finished processes.
pub fn averages(processes: &[Process]) -> Result<Averages, SchedulerError> {
    if processes.is_empty() {
        return Err(SchedulerError::NoProcesses);
    }

    let mut total_waiting: u128 = 0;
    let mut total_turnaround: u128 = 0;
    for process in processes {
        let record = process
            .record()
            .ok_or(SchedulerError::Unfinished { pid: process.pid() })?;
        total_waiting += u128::from(record.waiting);
        total_turnaround += u128::from(record.turnaround);
    }

    let count = processes.len() as f64;
    Ok(Averages {
        waiting: total_waiting as f64 / count,
        turnaround: total_turnaround as f64 / count,
    })
}

/// The outcome of one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    algorithm: Algorithm,
    quantum: Option<Time>,
    processes: Vec<Process>,
    timeline: Vec<Slice>,
    averages: Averages,
}

impl Schedule {
    /// Finalizes a run. Every process must have completed.
    pub(super) fn new(
        algorithm: Algorithm,
        quantum: Option<Time>,
        mut processes: Vec<Process>,
        timeline: Vec<Slice>,
    ) -> Result<Self, SchedulerError> {
        processes.sort_by_key(Process::pid);
        let averages = averages(&processes)?;

        Ok(Self {
            algorithm,
            quantum,
            processes,
            timeline,
            averages,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn quantum(&self) -> Option<Time> {
        self.quantum
    }

    /// Finished processes in pid order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn records(&self) -> Vec<ProcessRecord> {
        self.processes.iter().filter_map(Process::record).collect()
    }

    pub fn process(&self, pid: u32) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn timeline(&self) -> &[Slice] {
        &self.timeline
    }

    pub fn averages(&self) -> Averages {
        self.averages
    }

    pub fn average_waiting(&self) -> f64 {
        self.averages.waiting
    }

    pub fn average_turnaround(&self) -> f64 {
        self.averages.turnaround
    }

    pub fn start(&self) -> Time {
        self.timeline.first().map_or(0, |slice| slice.start)
    }

    /// Time at which the last process completes.
    pub fn makespan(&self) -> Time {
        self.timeline.last().map_or(0, |slice| slice.end)
    }

    pub fn busy_time(&self) -> Time {
        self.timeline.iter().map(Slice::len).sum()
    }

    /// Gaps between the first dispatch and the makespan where nothing ran.
    pub fn idle_time(&self) -> Time {
        self.makespan() - self.start() - self.busy_time()
    }

    pub fn running_at(&self, time: Time) -> Option<u32> {
        self.timeline
            .iter()
            .find(|slice| slice.contains(time))
            .map(|slice| slice.pid)
    }

    /// CPU time `pid` has received before `time`.
    pub fn progress_at(&self, pid: u32, time: Time) -> Time {
        self.timeline
            .iter()
            .filter(|slice| slice.pid == pid && slice.start < time)
            .map(|slice| slice.end.min(time) - slice.start)
            .sum()
    }
}

/// Appends slices in time order, joining a slice onto the previous one when
/// the same process simply keeps running.
#[derive(Debug, Default)]
pub(super) struct Timeline {
    slices: Vec<Slice>,
    merge: bool,
}

impl Timeline {
    pub fn merging() -> Self {
        Self {
            slices: Vec::new(),
            merge: true,
        }
    }

    pub fn push(&mut self, pid: u32, start: Time, end: Time) {
        if self.merge {
            if let Some(last) = self.slices.last_mut() {
                if last.pid == pid && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        self.slices.push(Slice { pid, start, end });
    }

    pub fn into_slices(self) -> Vec<Slice> {
        self.slices
    }
}
