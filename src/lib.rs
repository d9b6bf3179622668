//! Educational simulator of single-CPU process scheduling.
//!
//! Four disciplines are available: First-Come-First-Served, non-preemptive
//! Shortest-Job-First, preemptive Shortest-Remaining-Time-First and Round
//! Robin. Each run works on a private copy of the process list and returns a
//! [`Schedule`](scheduler::Schedule) with per-process completion, turnaround
//! and waiting times plus the CPU timeline.

pub mod cli;
pub mod error;
pub mod input;
pub mod report;
pub mod scheduler;

pub use error::{AppError, ErrorKind, SchedulerError};
pub use scheduler::{
    recommend_quantum, schedule, validate, Algorithm, Process, QuantumMethod, Schedule, Scheduler,
    Slice, Time,
};
