use super::{display::DisplayTerminal, Process, Schedule, Time};
use std::{io, time::Duration};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Next,
    Previous,
    None,
}

/// Playback state over one or more finished schedules sharing one clock, so
/// switching algorithms mid-replay compares them at the same instant.
pub struct Replay {
    schedules: Vec<Schedule>,
    selected: usize,
    clock: Time,
    paused: bool,
}

impl Replay {
    pub fn new(schedules: Vec<Schedule>) -> Self {
        let clock = schedules
            .iter()
            .map(Schedule::start)
            .min()
            .unwrap_or(0);

        Self {
            schedules,
            selected: 0,
            clock,
            paused: false,
        }
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&Schedule> {
        self.schedules.get(self.selected)
    }

    pub fn clock(&self) -> Time {
        self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn end(&self) -> Time {
        self.schedules
            .iter()
            .map(Schedule::makespan)
            .max()
            .unwrap_or(0)
    }

    pub fn is_finished(&self) -> bool {
        self.clock >= self.end()
    }

    /// Advances the shared clock by one unit unless every schedule is done.
    pub fn step(&mut self) {
        if !self.is_finished() {
            self.clock += 1;
        }
    }

    pub fn tick(&mut self) {
        if !self.paused {
            self.step();
        }
    }

    pub fn select_next(&mut self) {
        if !self.schedules.is_empty() {
            self.selected = (self.selected + 1) % self.schedules.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.schedules.is_empty() {
            self.selected = (self.selected + self.schedules.len() - 1) % self.schedules.len();
        }
    }

    /// Returns false if the replay should quit.
    pub fn handle(&mut self, event: RunnerEvent) -> bool {
        match event {
            RunnerEvent::Quit => return false,
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.step(),
            RunnerEvent::Next => self.select_next(),
            RunnerEvent::Previous => self.select_previous(),
            _ => {}
        }
        true
    }

    pub fn running(&self) -> Option<&Process> {
        let schedule = self.current()?;
        let pid = schedule.running_at(self.clock)?;
        schedule.process(pid)
    }
}

pub struct ReplayRunner {
    terminal: DisplayTerminal,
    replay: Replay,
}

impl ReplayRunner {
    /// Takes over the terminal; the replay advances one time unit per
    /// `tick_rate` without input.
    pub fn new(schedules: Vec<Schedule>, tick_rate: Duration) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new(tick_rate)?;

        Ok(Self {
            terminal,
            replay: Replay::new(schedules),
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal.draw(&self.replay)?;

        match self.terminal.get_input()? {
            Some(event) => Ok(self.replay.handle(event)),
            None => {
                self.replay.tick();
                Ok(true)
            }
        }
    }
}
