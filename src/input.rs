//! Loading process lists from the command line and from files.

use crate::error::AppError;
use crate::scheduler::Process;
use log::debug;
use serde::Deserialize;
use std::{fs, path::Path};

/// The eight-process workload the classroom examples use.
pub fn demo_processes() -> Vec<Process> {
    [
        (1, 1, 53),
        (2, 3, 43),
        (3, 8, 18),
        (4, 4, 16),
        (5, 6, 24),
        (6, 7, 73),
        (7, 2, 99),
        (8, 5, 27),
    ]
    .into_iter()
    .map(|(pid, arrival, burst)| Process::new(pid, arrival, burst))
    .collect()
}

/// Parses an `ARRIVAL:BURST` pair.
pub fn parse_spec(spec: &str, pid: u32) -> Result<Process, AppError> {
    let invalid = || AppError::ParseSpec {
        spec: spec.to_owned(),
    };

    let (arrival, burst) = spec.split_once(':').ok_or_else(invalid)?;
    let arrival = arrival.trim().parse::<i64>().map_err(|_| invalid())?;
    let burst = burst.trim().parse::<i64>().map_err(|_| invalid())?;

    Ok(Process::try_new(pid, arrival, burst)?)
}

pub fn parse_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Process>, AppError> {
    specs
        .iter()
        .zip(1..)
        .map(|(spec, pid)| parse_spec(spec.as_ref(), pid))
        .collect()
}

/// Parses a whitespace separated table with one process per line, either
/// `ARRIVAL BURST` or `PID ARRIVAL BURST`. Blank lines and lines starting with
/// `#` are skipped; pids default to the ordinal of the process in the table.
pub fn parse_table(text: &str) -> Result<Vec<Process>, AppError> {
    let mut processes = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let error = |reason: String| AppError::ParseTable {
            line: index + 1,
            reason,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (pid, arrival, burst) = match fields.as_slice() {
            [arrival, burst] => (None, *arrival, *burst),
            [pid, arrival, burst] => (Some(*pid), *arrival, *burst),
            _ => {
                return Err(error(format!(
                    "expected 2 or 3 fields, found {}",
                    fields.len()
                )))
            }
        };

        let pid = match pid {
            Some(pid) => pid
                .parse::<u32>()
                .map_err(|_| error(format!("invalid process id {pid:?}")))?,
            None => processes.len() as u32 + 1,
        };
        let arrival = arrival
            .parse::<i64>()
            .map_err(|_| error(format!("invalid arrival time {arrival:?}")))?;
        let burst = burst
            .parse::<i64>()
            .map_err(|_| error(format!("invalid burst time {burst:?}")))?;

        processes.push(Process::try_new(pid, arrival, burst)?);
    }

    Ok(processes)
}

#[derive(Debug, Deserialize)]
struct ProcessSpec {
    pid: Option<u32>,
    #[serde(alias = "arrival_time")]
    arrival: i64,
    #[serde(alias = "burst_time")]
    burst: i64,
}

/// Parses a JSON array of `{ "pid"?, "arrival", "burst" }` objects.
pub fn parse_json(text: &str) -> Result<Vec<Process>, AppError> {
    let specs: Vec<ProcessSpec> = serde_json::from_str(text)?;

    specs
        .into_iter()
        .zip(1..)
        .map(|(spec, ordinal)| -> Result<Process, AppError> {
            Ok(Process::try_new(
                spec.pid.unwrap_or(ordinal),
                spec.arrival,
                spec.burst,
            )?)
        })
        .collect()
}

/// Reads a process file, choosing the format by extension.
pub fn load(path: &Path) -> Result<Vec<Process>, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ReadInput {
        path: path.to_owned(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let processes = if is_json {
        parse_json(&text)?
    } else {
        parse_table(&text)?
    };

    debug!("Loaded {} processes from {}", processes.len(), path.display());
    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerError;
    use std::io::Write;

    #[test]
    fn specs_get_sequential_pids() {
        let processes = parse_specs(&["0:5", " 1 : 3 "]).unwrap();
        assert_eq!(
            processes,
            vec![Process::new(1, 0, 5), Process::new(2, 1, 3)]
        );
    }

    #[test]
    fn malformed_spec() {
        assert!(matches!(
            parse_spec("5", 1),
            Err(AppError::ParseSpec { spec }) if spec == "5"
        ));
        assert!(matches!(parse_spec("a:1", 1), Err(AppError::ParseSpec { .. })));
    }

    #[test]
    fn negative_arrival_is_a_scheduler_error() {
        assert!(matches!(
            parse_spec("-1:3", 2),
            Err(AppError::Scheduler(SchedulerError::NegativeArrival { pid: 2, arrival: -1 }))
        ));
    }

    #[test]
    fn table_with_and_without_pids() {
        let text = "# arrival burst\n0 5\n\n1 3\n";
        assert_eq!(
            parse_table(text).unwrap(),
            vec![Process::new(1, 0, 5), Process::new(2, 1, 3)]
        );

        let text = "7 0 5\n3 1 3\n";
        assert_eq!(
            parse_table(text).unwrap(),
            vec![Process::new(7, 0, 5), Process::new(3, 1, 3)]
        );
    }

    #[test]
    fn table_errors_name_the_line() {
        let err = parse_table("0 5\n1 x\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid burst time \"x\"");

        let err = parse_table("1 2 3 4\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: expected 2 or 3 fields, found 4");

        assert!(matches!(
            parse_table("0 0\n"),
            Err(AppError::Scheduler(SchedulerError::ZeroBurst { pid: 1 }))
        ));
    }

    #[test]
    fn json_with_optional_pids() {
        let text = r#"[{"arrival": 0, "burst": 5}, {"pid": 9, "arrival_time": 1, "burst_time": 3}]"#;
        assert_eq!(
            parse_json(text).unwrap(),
            vec![Process::new(1, 0, 5), Process::new(9, 1, 3)]
        );
        assert!(matches!(parse_json("{"), Err(AppError::Json(_))));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let mut table = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(table, "0 5\n1 3").unwrap();
        assert_eq!(load(table.path()).unwrap().len(), 2);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"[{{"arrival": 2, "burst": 4}}]"#).unwrap();
        assert_eq!(load(json.path()).unwrap(), vec![Process::new(1, 2, 4)]);
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, AppError::ReadInput { .. }));
        assert_eq!(err.exit_code_num(), 2);
    }

    #[test]
    fn demo_set() {
        let processes = demo_processes();
        assert_eq!(processes.len(), 8);
        assert_eq!(processes[6], Process::new(7, 2, 99));
    }
}
