use super::{SchedulerError, Time};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    arrival: Time,
    burst: Time,
    remaining: Time,
    completion: Option<Time>,
}

impl Process {
    pub fn new(pid: u32, arrival: Time, burst: Time) -> Self {
        Self {
            pid,
            arrival,
            burst,
            remaining: burst,
            completion: None,
        }
    }

    /// Builds a process from signed input values, rejecting anything the
    /// scheduling core cannot represent.
    pub fn try_new(pid: u32, arrival: i64, burst: i64) -> Result<Self, SchedulerError> {
        if pid == 0 {
            return Err(SchedulerError::InvalidPid);
        }
        if arrival < 0 {
            return Err(SchedulerError::NegativeArrival { pid, arrival });
        }
        if burst < 0 {
            return Err(SchedulerError::NegativeBurst { pid, burst });
        }
        if burst == 0 {
            return Err(SchedulerError::ZeroBurst { pid });
        }

        Ok(Process::new(pid, arrival as Time, burst as Time))
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival(&self) -> Time {
        self.arrival
    }

    pub fn burst(&self) -> Time {
        self.burst
    }

    pub fn remaining(&self) -> Time {
        self.remaining
    }

    pub fn completion(&self) -> Option<Time> {
        self.completion
    }

    pub fn is_finished(&self) -> bool {
        self.completion.is_some()
    }

    pub fn has_arrived(&self, now: Time) -> bool {
        self.arrival <= now
    }

    pub fn turnaround(&self) -> Option<Time> {
        self.completion.map(|completion| completion - self.arrival)
    }

    pub fn waiting(&self) -> Option<Time> {
        self.turnaround().map(|turnaround| turnaround - self.burst)
    }

    /// A copy with the working fields cleared, ready for a fresh run.
    pub(super) fn reset(&self) -> Self {
        Process::new(self.pid, self.arrival, self.burst)
    }

    /// Consumes up to `slice` units of the remaining burst and returns how
    /// much was actually used.
    pub(super) fn run_for(&mut self, slice: Time) -> Time {
        let used = slice.min(self.remaining);
        self.remaining -= used;
        used
    }

    pub(super) fn complete(&mut self, now: Time) {
        debug_assert_eq!(self.remaining, 0);
        debug_assert!(self.completion.is_none());
        self.completion = Some(now);
    }

    pub fn record(&self) -> Option<ProcessRecord> {
        Some(ProcessRecord {
            pid: self.pid,
            arrival: self.arrival,
            burst: self.burst,
            completion: self.completion?,
            turnaround: self.turnaround()?,
            waiting: self.waiting()?,
        })
    }
}

/// The finished timing figures of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub arrival: Time,
    pub burst: Time,
    pub completion: Time,
    pub turnaround: Time,
    pub waiting: Time,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_times_need_completion() {
        let mut process = Process::new(1, 2, 3);
        assert_eq!(process.turnaround(), None);
        assert_eq!(process.waiting(), None);
        assert!(process.record().is_none());

        assert_eq!(process.run_for(10), 3);
        process.complete(9);
        assert_eq!(process.turnaround(), Some(7));
        assert_eq!(process.waiting(), Some(4));
    }

    #[test]
    fn try_new_rejects_bad_values() {
        assert_eq!(Process::try_new(0, 0, 1), Err(SchedulerError::InvalidPid));
        assert_eq!(
            Process::try_new(3, -1, 1),
            Err(SchedulerError::NegativeArrival { pid: 3, arrival: -1 })
        );
        assert_eq!(
            Process::try_new(3, 0, -4),
            Err(SchedulerError::NegativeBurst { pid: 3, burst: -4 })
        );
        assert_eq!(
            Process::try_new(3, 0, 0),
            Err(SchedulerError::ZeroBurst { pid: 3 })
        );
        assert_eq!(Process::try_new(3, 4, 5), Ok(Process::new(3, 4, 5)));
    }

    #[test]
    fn reset_clears_working_fields() {
        let mut process = Process::new(1, 0, 4);
        process.run_for(4);
        process.complete(4);

        let fresh = process.reset();
        assert_eq!(fresh.remaining(), 4);
        assert!(!fresh.is_finished());
    }
}
