use super::{
    schedule::Timeline, working_copy, Algorithm, Process, Schedule, Scheduler, SchedulerError,
    Time,
};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct SrtfScheduler;

impl SrtfScheduler {
    /// Index of the arrived, unfinished process with the least remaining
    /// time. Ties go to the earlier arrival, then to the lower pid.
    fn poll_process(processes: &[Process], now: Time) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| !process.is_finished() && process.has_arrived(now))
            .min_by_key(|(_, process)| (process.remaining(), process.arrival(), process.pid()))
            .map(|(index, _)| index)
    }
}

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "Shortest Remaining Time First (SRTF)";

    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = working_copy(processes)?;
        let mut timeline = Timeline::merging();
        let mut clock = 0;
        let mut done = 0;
        let mut last = None;

        while done < processes.len() {
            let Some(index) = SrtfScheduler::poll_process(&processes, clock) else {
                clock = processes
                    .iter()
                    .filter(|process| !process.is_finished())
                    .map(Process::arrival)
                    .min()
                    .unwrap_or(clock);
                trace!("SRTF: CPU idle until {clock}");
                continue;
            };

            let process = &processes[index];
            if last != Some(process.pid()) {
                trace!(
                    "SRTF: P{} dispatched at {clock} with {} remaining",
                    process.pid(),
                    process.remaining()
                );
                last = Some(process.pid());
            }

            // Run until done or until the next arrival may preempt
            let next_arrival = processes
                .iter()
                .map(Process::arrival)
                .filter(|&arrival| arrival > clock)
                .min();
            let process = &mut processes[index];
            let slice = match next_arrival {
                Some(arrival) => process.remaining().min(arrival - clock),
                None => process.remaining(),
            };
            let start = clock;
            clock += process.run_for(slice);
            timeline.push(process.pid(), start, clock);

            if process.remaining() == 0 {
                process.complete(clock);
                done += 1;
            }
        }

        debug!("SRTF finished {done} processes at {clock}");
        Schedule::new(self.algorithm(), None, processes, timeline.into_slices())
    }
}
