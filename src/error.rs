use std::path::PathBuf;
use std::process::ExitCode;

/// Broad category of a scheduling failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The process list itself cannot be scheduled.
    InvalidInput,
    /// The process list is fine but the run was configured wrongly.
    InvalidConfiguration,
}

/// Errors raised by the scheduling core, always before any simulation state
/// is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    // ── Invalid input ────────────────────────────────────────────────

    #[error("invalid input: there are no processes to schedule")]
    NoProcesses,

    #[error("invalid input: process ids must be positive")]
    InvalidPid,

    #[error("invalid input: process id {pid} appears more than once")]
    DuplicatePid { pid: u32 },

    #[error("invalid input: process {pid} has a zero burst time")]
    ZeroBurst { pid: u32 },

    #[error("invalid input: process {pid} has a negative burst time ({burst})")]
    NegativeBurst { pid: u32, burst: i64 },

    #[error("invalid input: process {pid} has a negative arrival time ({arrival})")]
    NegativeArrival { pid: u32, arrival: i64 },

    #[error("invalid input: arrival and burst times are too large to simulate")]
    TimeOverflow,

    #[error("invalid input: process {pid} has not completed")]
    Unfinished { pid: u32 },

    // ── Invalid configuration ────────────────────────────────────────

    #[error("invalid configuration: the time quantum must be positive, got {0}")]
    InvalidQuantum(i64),

    #[error("invalid configuration: round robin needs a time quantum")]
    MissingQuantum,
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuantum(_) | Self::MissingQuantum => ErrorKind::InvalidConfiguration,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// All errors the command line front end can end with.
///
/// - **Scheduling errors** (exit code 1): bad processes or options the user can fix
/// - **Infrastructure errors** (exit code 2): unreadable files, bad formats, terminal failures
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("cannot read process table {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    ParseTable { line: usize, reason: String },

    #[error("invalid process spec {spec:?}: expected ARRIVAL:BURST")]
    ParseSpec { spec: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code_num(&self) -> u8 {
        match self {
            Self::Scheduler(_) | Self::ParseSpec { .. } => 1,
            _ => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code_num())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(SchedulerError::NoProcesses.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            SchedulerError::ZeroBurst { pid: 1 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(SchedulerError::TimeOverflow.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            SchedulerError::InvalidQuantum(0).kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            SchedulerError::MissingQuantum.kind(),
            ErrorKind::InvalidConfiguration
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(AppError::from(SchedulerError::NoProcesses).exit_code_num(), 1);
        assert_eq!(
            AppError::ParseTable {
                line: 3,
                reason: "bad".into()
            }
            .exit_code_num(),
            2
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(AppError::from(io).exit_code_num(), 2);
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            SchedulerError::InvalidQuantum(-2).to_string(),
            "invalid configuration: the time quantum must be positive, got -2"
        );
        assert_eq!(
            AppError::from(SchedulerError::DuplicatePid { pid: 4 }).to_string(),
            "invalid input: process id 4 appears more than once"
        );
    }
}
