use super::runner::{Replay, RunnerEvent};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        // Set up the terminal-user-interface, raw mode last
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
        enter_raw_mode(crossterm::terminal::enable_raw_mode, || {
            let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        })?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, replay: &Replay) -> Result<(), io::Error> {
        let Some(schedule) = replay.current() else {
            return Ok(());
        };
        let clock = replay.clock();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(f.size());

            let titles = replay
                .schedules()
                .iter()
                .map(|schedule| Spans::from(schedule.algorithm().name()))
                .collect();
            let tabs = Tabs::new(titles)
                .select(replay.selected())
                .block(Block::default().borders(Borders::ALL).title("Algorithm"))
                .highlight_style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::Yellow),
                );

            f.render_widget(tabs, chunks[0]);

            let state = if replay.is_paused() { " (paused)" } else { "" };
            let status = Paragraph::new(match replay.running() {
                Some(process) => format!(
                    "t = {clock}{state} | P{} running | {} of {} left",
                    process.pid(),
                    process.burst() - schedule.progress_at(process.pid(), clock),
                    process.burst()
                ),
                None if clock >= schedule.makespan() => {
                    format!("t = {clock}{state} | All processes finished.")
                }
                None => format!("t = {clock}{state} | CPU idle."),
            })
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Current Process")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(status, chunks[1]);

            let items = schedule.processes().iter().map(|process| {
                let progress = schedule.progress_at(process.pid(), clock);
                // Completion figures only show once the replay reaches them
                let finished = process.completion().filter(|&completion| completion <= clock);
                let field = |value: Option<u64>| value.map_or("-".to_owned(), |v| v.to_string());

                Row::new(vec![
                    Cell::from(format!("P{}", process.pid()))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.arrival().to_string()),
                    Cell::from(process.burst().to_string()),
                    Cell::from(format!("{progress}/{}", process.burst())),
                    Cell::from(field(finished)),
                    Cell::from(field(finished.and(process.turnaround()))),
                    Cell::from(field(finished.and(process.waiting()))),
                ])
            });

            let title = match schedule.quantum() {
                Some(quantum) => format!("{} - Quantum: {quantum}", schedule.algorithm()),
                None => schedule.algorithm().to_string(),
            };
            let table = Table::new(items)
                .header(
                    Row::new(vec!["PID", "AT", "BT", "Ran", "CT", "TAT", "WT"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(6),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(6),
                    Constraint::Length(6),
                ])
                .block(Block::default().title(title).borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[2]);

            let gantt: Vec<String> = schedule
                .timeline()
                .iter()
                .filter(|slice| slice.start < clock)
                .map(|slice| format!("P{} {}-{}", slice.pid, slice.start, slice.end.min(clock)))
                .collect();
            let gantt = Paragraph::new(gantt.join(" | "))
                .block(Block::default().borders(Borders::ALL).title("Gantt"));

            f.render_widget(gantt, chunks[3]);

            let help = Paragraph::new("q quit | p pause | r resume | s step | \u{2190}/\u{2192} algorithm")
                .style(Style::default().fg(Color::DarkGray));

            f.render_widget(help, chunks[4]);
        })?;
        Ok(())
    }

    /// Blocks until the next input or tick. `None` means a tick passed.
    pub fn get_input(&self) -> Result<Option<RunnerEvent>, io::Error> {
        let event = self
            .input_rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::BrokenPipe, e))?;

        // Get the user's input and return a matching event
        Ok(match event {
            DisplayEvent::Input(key) => Some(if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => RunnerEvent::Quit,
                    KeyCode::Char('p') => RunnerEvent::Pause,
                    KeyCode::Char('r') => RunnerEvent::Resume,
                    KeyCode::Char('s') => RunnerEvent::Step,
                    KeyCode::Right | KeyCode::Tab => RunnerEvent::Next,
                    KeyCode::Left => RunnerEvent::Previous,
                    _ => RunnerEvent::None,
                }
            } else {
                RunnerEvent::None
            }),
            DisplayEvent::Tick => None,
        })
    }
}

/// Enables raw mode, calling `rollback` to undo earlier setup if that fails.
fn enter_raw_mode(
    enable: impl FnOnce() -> io::Result<()>,
    rollback: impl FnOnce(),
) -> io::Result<()> {
    enable().map_err(|err| {
        rollback();
        err
    })
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_raw_mode_rolls_back() {
        let rolled_back = std::cell::Cell::new(false);
        let result = enter_raw_mode(
            || Err(io::Error::new(io::ErrorKind::Unsupported, "not a tty")),
            || rolled_back.set(true),
        );
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::Unsupported);
        assert!(rolled_back.get());
    }

    #[test]
    fn raw_mode_keeps_setup_on_success() {
        let rolled_back = std::cell::Cell::new(false);
        enter_raw_mode(|| Ok(()), || rolled_back.set(true)).unwrap();
        assert!(!rolled_back.get());
    }
}
