use super::{
    schedule::Timeline, working_copy, Algorithm, Process, Schedule, Scheduler, SchedulerError,
};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First Come First Served (FCFS)";

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = working_copy(processes)?;
        // Stable, so equal arrivals keep their input order
        processes.sort_by_key(Process::arrival);

        let mut timeline = Timeline::default();
        let mut clock = 0;
        for process in processes.iter_mut() {
            let start = clock.max(process.arrival());
            let end = start + process.run_for(process.burst());
            trace!("FCFS: P{} runs {start}..{end}", process.pid());

            process.complete(end);
            timeline.push(process.pid(), start, end);
            clock = end;
        }

        debug!("FCFS finished {} processes at {clock}", processes.len());
        Schedule::new(self.algorithm(), None, processes, timeline.into_slices())
    }
}
