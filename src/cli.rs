use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::report::OutputFormat;
use crate::scheduler::{Algorithm, QuantumMethod};

/// Simulates classic CPU scheduling algorithms over a fixed set of processes.
#[derive(Parser, Debug)]
#[command(name = "cpu-sched-sim", version, about)]
pub struct Cli {
    /// Algorithm to simulate.
    #[arg(short, long, value_enum, default_value = "all")]
    pub algorithm: AlgorithmChoice,

    /// Round Robin time quantum. Defaults to the recommended quantum.
    #[arg(short, long, allow_negative_numbers = true)]
    pub quantum: Option<i64>,

    /// Statistic used to recommend a quantum from the burst times.
    #[arg(short = 'm', long, value_enum, default_value_t = QuantumMethod::Median)]
    pub quantum_method: QuantumMethod,

    /// Process table file: `ARRIVAL BURST` or `PID ARRIVAL BURST` per line,
    /// or a JSON array when the name ends in `.json`.
    #[arg(short, long, conflicts_with = "process")]
    pub input: Option<PathBuf>,

    /// A process as ARRIVAL:BURST; repeat for more. Without `--input` or
    /// `--process` the built-in demo workload is used.
    #[arg(short, long = "process", value_name = "ARRIVAL:BURST", allow_hyphen_values = true)]
    pub process: Vec<String>,

    /// Print a Gantt chart under each result table.
    #[arg(long)]
    pub gantt: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Replay the schedules in an interactive terminal view.
    #[arg(long, conflicts_with = "output")]
    pub tui: bool,

    /// Milliseconds per simulated time unit in the replay view.
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    Fcfs,
    Sjf,
    Srtf,
    Rr,
    All,
}

impl AlgorithmChoice {
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match self {
            Self::Fcfs => vec![Algorithm::Fcfs],
            Self::Sjf => vec![Algorithm::Sjf],
            Self::Srtf => vec![Algorithm::Srtf],
            Self::Rr => vec![Algorithm::RoundRobin],
            Self::All => Algorithm::ALL.to_vec(),
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["cpu-sched-sim"]).unwrap();
        assert_eq!(cli.algorithm, AlgorithmChoice::All);
        assert_eq!(cli.algorithm.algorithms().len(), 4);
        assert_eq!(cli.quantum, None);
        assert_eq!(cli.quantum_method, QuantumMethod::Median);
        assert_eq!(cli.output, OutputFormat::Human);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
        assert!(cli.process.is_empty());
    }

    #[test]
    fn round_robin_with_processes() {
        let cli = Cli::try_parse_from([
            "cpu-sched-sim", "-a", "rr", "-q", "2", "-p", "0:5", "-p", "1:3", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.algorithm.algorithms(), vec![Algorithm::RoundRobin]);
        assert_eq!(cli.quantum, Some(2));
        assert_eq!(cli.process, vec!["0:5", "1:3"]);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn negative_quantum_reaches_validation() {
        let cli = Cli::try_parse_from(["cpu-sched-sim", "-q", "-4"]).unwrap();
        assert_eq!(cli.quantum, Some(-4));
    }

    #[test]
    fn input_and_process_conflict() {
        assert!(Cli::try_parse_from(["cpu-sched-sim", "-i", "a.txt", "-p", "0:1"]).is_err());
    }

    #[test]
    fn mean_method() {
        let cli = Cli::try_parse_from(["cpu-sched-sim", "-m", "mean", "--output", "json"]).unwrap();
        assert_eq!(cli.quantum_method, QuantumMethod::Mean);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
