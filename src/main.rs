use std::{process::ExitCode, time::Duration};

use clap::Parser;
use log::info;

use cpu_sched_sim::cli::Cli;
use cpu_sched_sim::error::AppError;
use cpu_sched_sim::input;
use cpu_sched_sim::report::{self, RunReport};
use cpu_sched_sim::scheduler::{
    recommend_quantum, schedule, validate, Algorithm, Process, ReplayRunner, RoundRobinScheduler,
    Schedule, Time,
};

fn load_processes(cli: &Cli) -> Result<Vec<Process>, AppError> {
    if let Some(path) = &cli.input {
        input::load(path)
    } else if !cli.process.is_empty() {
        input::parse_specs(cli.process.as_slice())
    } else {
        info!("No processes given, using the demo workload");
        Ok(input::demo_processes())
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let processes = load_processes(cli)?;
    validate(&processes)?;

    let bursts: Vec<Time> = processes.iter().map(Process::burst).collect();
    let recommended = recommend_quantum(&bursts, cli.quantum_method)?;

    let algorithms = cli.algorithm.algorithms();
    let quantum = match cli.quantum {
        // Only Round Robin reads the quantum, so only then is a bad one fatal
        Some(quantum) if algorithms.contains(&Algorithm::RoundRobin) => {
            RoundRobinScheduler::with_quantum(quantum)?.quantum()
        }
        _ => recommended,
    };
    info!(
        "Scheduling {} processes, quantum {quantum} (recommended {recommended} by {})",
        processes.len(),
        cli.quantum_method
    );

    let schedules = algorithms
        .iter()
        .map(|&algorithm| schedule(&processes, algorithm, Some(quantum)))
        .collect::<Result<Vec<Schedule>, _>>()?;

    if cli.tui {
        let mut runner = ReplayRunner::new(schedules, Duration::from_millis(cli.tick_ms))?;
        while runner.run()? {}
        return Ok(());
    }

    let report = RunReport::new(processes.len(), cli.quantum_method, recommended, &schedules);
    report::emit(cli.output, &report, cli.gantt)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::emit_error(cli.output, e.exit_code_num(), &e.to_string());
            e.exit_code()
        }
    }
}
