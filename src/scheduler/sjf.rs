use super::{
    schedule::Timeline, working_copy, Algorithm, Process, Schedule, Scheduler, SchedulerError,
    Time,
};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct SjfScheduler;

impl SjfScheduler {
    /// Index of the shortest job that has arrived by `now`. Ties go to the
    /// earlier arrival, then to the lower pid.
    fn poll_process(processes: &[Process], now: Time) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| !process.is_finished() && process.has_arrived(now))
            .min_by_key(|(_, process)| (process.burst(), process.arrival(), process.pid()))
            .map(|(index, _)| index)
    }
}

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "Shortest Job First (SJF)";

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = working_copy(processes)?;
        let mut timeline = Timeline::default();
        let mut clock = 0;
        let mut done = 0;

        while done < processes.len() {
            let Some(index) = SjfScheduler::poll_process(&processes, clock) else {
                // Nothing ready: jump to the next arrival
                clock = processes
                    .iter()
                    .filter(|process| !process.is_finished())
                    .map(Process::arrival)
                    .min()
                    .unwrap_or(clock);
                trace!("SJF: CPU idle until {clock}");
                continue;
            };

            let process = &mut processes[index];
            let start = clock;
            clock += process.run_for(process.burst());
            trace!("SJF: P{} runs {start}..{clock}", process.pid());

            process.complete(clock);
            timeline.push(process.pid(), start, clock);
            done += 1;
        }

        debug!("SJF finished {done} processes at {clock}");
        Schedule::new(self.algorithm(), None, processes, timeline.into_slices())
    }
}
