use super::{SchedulerError, Time};
use serde::Serialize;
use std::fmt;

/// Statistic used to derive a recommended Round Robin quantum from the burst
/// times of a workload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuantumMethod {
    /// Arithmetic mean of the bursts.
    Mean,
    /// Median of the bursts; the mean of the two middle values for an even count.
    #[default]
    Median,
}

impl fmt::Display for QuantumMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
        }
    }
}

/// Rounds the chosen statistic to the nearest integer (halves away from
/// zero) and never recommends less than 1.
pub fn recommend_quantum(bursts: &[Time], method: QuantumMethod) -> Result<Time, SchedulerError> {
    if bursts.is_empty() {
        return Err(SchedulerError::NoProcesses);
    }

    let statistic = match method {
        QuantumMethod::Mean => {
            bursts.iter().map(|&burst| burst as f64).sum::<f64>() / bursts.len() as f64
        }
        QuantumMethod::Median => {
            let mut sorted = bursts.to_vec();
            sorted.sort_unstable();

            let middle = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[middle - 1] as u128 + sorted[middle] as u128) as f64 / 2.0
            } else {
                sorted[middle] as f64
            }
        }
    };

    Ok((statistic.round() as Time).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_BURSTS: [Time; 8] = [53, 43, 18, 16, 24, 73, 99, 27];

    #[test]
    fn demo_workload() {
        assert_eq!(recommend_quantum(&DEMO_BURSTS, QuantumMethod::Median), Ok(35));
        assert_eq!(recommend_quantum(&DEMO_BURSTS, QuantumMethod::Mean), Ok(44));
    }

    #[test]
    fn odd_count_median_is_the_middle_value() {
        assert_eq!(recommend_quantum(&[9, 1, 4], QuantumMethod::Median), Ok(4));
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(recommend_quantum(&[2, 3], QuantumMethod::Median), Ok(3));
        assert_eq!(recommend_quantum(&[2, 3], QuantumMethod::Mean), Ok(3));
        assert_eq!(recommend_quantum(&[1, 1, 2], QuantumMethod::Mean), Ok(1));
    }

    #[test]
    fn never_below_one() {
        assert_eq!(recommend_quantum(&[0], QuantumMethod::Mean), Ok(1));
        assert_eq!(recommend_quantum(&[0, 0], QuantumMethod::Median), Ok(1));
    }

    #[test]
    fn huge_bursts_do_not_overflow() {
        let huge = [i64::MAX as Time; 3];
        assert_eq!(recommend_quantum(&huge, QuantumMethod::Mean), Ok(i64::MAX as Time + 1));
        assert_eq!(
            recommend_quantum(&[Time::MAX, Time::MAX], QuantumMethod::Median),
            Ok(Time::MAX)
        );
        assert_eq!(
            recommend_quantum(&[Time::MAX, Time::MAX], QuantumMethod::Mean),
            Ok(Time::MAX)
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            recommend_quantum(&[], QuantumMethod::Mean),
            Err(SchedulerError::NoProcesses)
        );
    }

    #[test]
    fn median_is_the_default() {
        assert_eq!(QuantumMethod::default(), QuantumMethod::Median);
        assert_eq!(QuantumMethod::Mean.to_string(), "Mean");
    }
}
