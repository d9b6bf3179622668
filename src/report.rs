use crate::scheduler::{Algorithm, ProcessRecord, QuantumMethod, Schedule, Slice, Time};
use serde::Serialize;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 80;

/// Output format selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object on stdout.
    Json,
    /// Result tables on stdout.
    #[default]
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub preemptive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Time>,
    pub processes: Vec<ProcessRecord>,
    pub average_waiting: f64,
    pub average_turnaround: f64,
    pub makespan: Time,
    pub idle_time: Time,
    pub timeline: Vec<Slice>,
}

impl From<&Schedule> for ScheduleReport {
    fn from(schedule: &Schedule) -> Self {
        Self {
            algorithm: schedule.algorithm(),
            name: schedule.algorithm().name(),
            preemptive: schedule.algorithm().is_preemptive(),
            quantum: schedule.quantum(),
            processes: schedule.records(),
            average_waiting: schedule.average_waiting(),
            average_turnaround: schedule.average_turnaround(),
            makespan: schedule.makespan(),
            idle_time: schedule.idle_time(),
            timeline: schedule.timeline().to_vec(),
        }
    }
}

/// Everything one invocation computed.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub process_count: usize,
    pub quantum_method: QuantumMethod,
    pub recommended_quantum: Time,
    pub schedules: Vec<ScheduleReport>,
}

impl RunReport {
    pub fn new(
        process_count: usize,
        quantum_method: QuantumMethod,
        recommended_quantum: Time,
        schedules: &[Schedule],
    ) -> Self {
        Self {
            process_count,
            quantum_method,
            recommended_quantum,
            schedules: schedules.iter().map(ScheduleReport::from).collect(),
        }
    }
}

fn rule(out: &mut String, ch: char) {
    out.extend(std::iter::repeat(ch).take(RULE_WIDTH));
    out.push('\n');
}

pub fn render_header(report: &RunReport) -> String {
    let mut out = String::from("\n");
    rule(&mut out, '=');
    out.push_str("CPU SCHEDULING ALGORITHMS\n");
    rule(&mut out, '=');
    let _ = writeln!(out, "Total Processes: {}", report.process_count);
    rule(&mut out, '-');
    let _ = writeln!(
        out,
        "Recommended Quantum Time ({}): {}",
        report.quantum_method, report.recommended_quantum
    );
    rule(&mut out, '=');
    out
}

/// The per-algorithm result table.
pub fn render_table(report: &ScheduleReport) -> String {
    let mut out = String::from("\n");
    rule(&mut out, '=');
    match report.quantum {
        Some(quantum) => {
            let _ = writeln!(out, "Algorithm: {} - Quantum: {quantum}", report.name);
        }
        None => {
            let _ = writeln!(out, "Algorithm: {}", report.name);
        }
    }
    rule(&mut out, '=');

    let _ = writeln!(
        out,
        "{:<8}{:<8}{:<8}{:<12}{:<8}{:<8}",
        "PID", "AT", "BT", "CT", "TAT", "WT"
    );
    rule(&mut out, '-');
    for record in &report.processes {
        let _ = writeln!(
            out,
            "{:<8}{:<8}{:<8}{:<12}{:<8}{:<8}",
            record.pid,
            record.arrival,
            record.burst,
            record.completion,
            record.turnaround,
            record.waiting
        );
    }
    rule(&mut out, '-');

    let _ = writeln!(out, "Average WT: {:.2}", report.average_waiting);
    let _ = writeln!(out, "Average TAT: {:.2}", report.average_turnaround);
    out
}

/// Draws the timeline as a bar of cells with their start times underneath.
/// Gaps where the CPU idled show up as `--` cells.
pub fn render_gantt(timeline: &[Slice]) -> String {
    let mut cells: Vec<(String, Time)> = Vec::new();
    let mut last_end = None;
    for slice in timeline {
        if let Some(end) = last_end {
            if slice.start > end {
                cells.push(("--".to_owned(), end));
            }
        }
        cells.push((format!("P{}", slice.pid), slice.start));
        last_end = Some(slice.end);
    }

    let Some(last_end) = last_end else {
        return String::new();
    };

    let mut bar = String::from("|");
    let mut axis = String::new();
    for (label, start) in &cells {
        let start = start.to_string();
        let width = (label.len() + 2).max(start.len() + 1);
        let _ = write!(bar, "{label:^width$}|");
        let _ = write!(axis, "{start:<w$}", w = width + 1);
    }
    let _ = write!(axis, "{last_end}");

    format!("\nGantt Chart:\n{bar}\n{axis}\n")
}

/// Side-by-side averages of every algorithm that ran.
pub fn render_comparison(reports: &[ScheduleReport]) -> String {
    let mut out = String::from("\n");
    rule(&mut out, '=');
    out.push_str("Comparison\n");
    rule(&mut out, '=');
    let _ = writeln!(
        out,
        "{:<44}{:>10}{:>10}{:>10}{:>6}",
        "Algorithm", "Avg WT", "Avg TAT", "Makespan", "Idle"
    );
    rule(&mut out, '-');
    for report in reports {
        let name = match report.quantum {
            Some(quantum) => format!("{} q={quantum}", report.name),
            None => report.name.to_owned(),
        };
        let _ = writeln!(
            out,
            "{:<44}{:>10.2}{:>10.2}{:>10}{:>6}",
            name, report.average_waiting, report.average_turnaround, report.makespan, report.idle_time
        );
    }
    rule(&mut out, '=');
    out
}

pub fn render_human(report: &RunReport, gantt: bool) -> String {
    let mut out = render_header(report);
    for schedule in &report.schedules {
        out.push_str(&render_table(schedule));
        if gantt {
            out.push_str(&render_gantt(&schedule.timeline));
        }
    }
    if report.schedules.len() > 1 {
        out.push_str(&render_comparison(&report.schedules));
    }
    out
}

/// Write a successful result to stdout.
pub fn emit(format: OutputFormat, report: &RunReport, gantt: bool) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Human => print!("{}", render_human(report, gantt)),
    }
    Ok(())
}

/// Write an error to stdout (JSON mode) or stderr (human mode).
pub fn emit_error(format: OutputFormat, exit_code_num: u8, message: &str) {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": message,
                "exit_code": exit_code_num,
            });
            println!("{obj}");
        }
        OutputFormat::Human => eprintln!("error: {message}"),
    }
}
