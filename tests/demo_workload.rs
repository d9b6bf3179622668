//! Reference results for the built-in eight-process workload.

use cpu_sched_sim::input::demo_processes;
use cpu_sched_sim::{recommend_quantum, schedule, Algorithm, QuantumMethod, Schedule, Time};

fn completions(schedule: &Schedule) -> Vec<Time> {
    schedule
        .records()
        .iter()
        .map(|record| record.completion)
        .collect()
}

fn run(algorithm: Algorithm, quantum: Option<Time>) -> Schedule {
    schedule(&demo_processes(), algorithm, quantum).unwrap()
}

#[test]
fn fcfs() {
    let schedule = run(Algorithm::Fcfs, None);
    assert_eq!(completions(&schedule), vec![54, 196, 354, 212, 263, 336, 153, 239]);
    assert_eq!(schedule.average_waiting(), 177.25);
    assert_eq!(schedule.average_turnaround(), 221.375);
}

#[test]
fn sjf() {
    let schedule = run(Algorithm::Sjf, None);
    assert_eq!(completions(&schedule), vec![54, 182, 88, 70, 112, 255, 354, 139]);
    assert_eq!(schedule.average_waiting(), 108.125);
    assert_eq!(schedule.average_turnaround(), 152.25);
}

#[test]
fn srtf() {
    let schedule = run(Algorithm::Srtf, None);
    assert_eq!(completions(&schedule), vec![182, 131, 38, 20, 62, 255, 354, 89]);
    assert_eq!(schedule.average_waiting(), 92.75);
    assert_eq!(schedule.average_turnaround(), 136.875);
}

#[test]
fn round_robin_with_median_quantum() {
    let bursts: Vec<Time> = demo_processes().iter().map(|p| p.burst()).collect();
    let quantum = recommend_quantum(&bursts, QuantumMethod::Median).unwrap();
    assert_eq!(quantum, 35);

    let schedule = run(Algorithm::RoundRobin, Some(quantum));
    assert_eq!(completions(&schedule), vec![244, 287, 226, 122, 173, 354, 351, 149]);
    assert_eq!(schedule.average_waiting(), 189.625);
    assert_eq!(schedule.average_turnaround(), 233.75);
}

#[test]
fn round_robin_with_mean_quantum() {
    let bursts: Vec<Time> = demo_processes().iter().map(|p| p.burst()).collect();
    let quantum = recommend_quantum(&bursts, QuantumMethod::Mean).unwrap();
    assert_eq!(quantum, 44);

    let schedule = run(Algorithm::RoundRobin, Some(quantum));
    assert_eq!(completions(&schedule), vec![270, 132, 261, 148, 199, 343, 354, 175]);
    assert_eq!(schedule.average_waiting(), 186.625);
    assert_eq!(schedule.average_turnaround(), 230.75);
}

#[test]
fn every_algorithm_ends_at_the_total_work() {
    // The first process arrives at 1 and the CPU never idles afterwards
    for algorithm in Algorithm::ALL {
        let schedule = run(algorithm, Some(35));
        assert_eq!(schedule.start(), 1);
        assert_eq!(schedule.makespan(), 354);
        assert_eq!(schedule.idle_time(), 0);
    }
}
