use super::{
    schedule::Timeline, working_copy, Algorithm, Process, Schedule, Scheduler, SchedulerError,
    Time,
};
use log::{debug, trace};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: Time,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Time) -> Result<Self, SchedulerError> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(0));
        }
        Ok(Self { quantum })
    }

    /// Accepts a signed quantum as typed by a user.
    pub fn with_quantum(quantum: i64) -> Result<Self, SchedulerError> {
        if quantum <= 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        RoundRobinScheduler::new(quantum as Time)
    }

    pub fn quantum(&self) -> Time {
        self.quantum
    }
}

/// FIFO ready queue fed from an arrival-ordered list of processes.
struct ReadyQueue {
    queue: VecDeque<usize>,
    arrivals: Vec<usize>,
    admitted: usize,
}

impl ReadyQueue {
    fn new(processes: &[Process]) -> Self {
        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&index| (processes[index].arrival(), processes[index].pid()));

        Self {
            queue: VecDeque::with_capacity(processes.len()),
            arrivals,
            admitted: 0,
        }
    }

    /// Enqueues every not yet admitted process that has arrived by `now`.
    fn admit(&mut self, processes: &[Process], now: Time) {
        while let Some(&index) = self.arrivals.get(self.admitted) {
            if !processes[index].has_arrived(now) {
                break;
            }
            self.queue.push_back(index);
            self.admitted += 1;
        }
    }

    fn next_arrival(&self, processes: &[Process]) -> Option<Time> {
        self.arrivals
            .get(self.admitted)
            .map(|&index| processes[index].arrival())
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin (RR)";

    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = working_copy(processes)?;
        let mut ready = ReadyQueue::new(&processes);
        let mut timeline = Timeline::default();
        let mut done = 0;

        let mut clock = ready.next_arrival(&processes).unwrap_or(0);
        ready.admit(&processes, clock);

        while done < processes.len() {
            let index = match ready.queue.pop_front() {
                Some(index) => index,
                None => {
                    let Some(arrival) = ready.next_arrival(&processes) else {
                        break;
                    };
                    trace!("RR: CPU idle until {arrival}");
                    clock = clock.max(arrival);
                    ready.admit(&processes, clock);
                    continue;
                }
            };

            let start = clock;
            clock += processes[index].run_for(self.quantum);
            trace!("RR: P{} runs {start}..{clock}", processes[index].pid());
            timeline.push(processes[index].pid(), start, clock);

            // Arrivals during the slice queue up ahead of the preempted process
            ready.admit(&processes, clock);

            let process = &mut processes[index];
            if process.remaining() > 0 {
                ready.queue.push_back(index);
            } else {
                process.complete(clock);
                done += 1;
            }
        }

        debug!(
            "RR (quantum {}) finished {done} processes at {clock}",
            self.quantum
        );
        Schedule::new(
            self.algorithm(),
            Some(self.quantum),
            processes,
            timeline.into_slices(),
        )
    }
}
