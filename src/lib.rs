//! # officevisor
//!
//! **officevisor** simulates a professor's office hours: a bounded number of
//! seats shared by two competing classes of students under a fairness
//! policy enforced by a single arbiter (the professor), who must also take
//! a break after helping a fixed number of students.
//!
//! The interesting part is the admission-control core: who may occupy a
//! seat at any instant, how waiting students are released, how starvation
//! is prevented across classes, and how the mandatory break interacts with
//! admission. Workload files, task spawning, and progress logging are thin
//! orchestration around that core.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   workload file ──► Workload ──► Simulation
//!                                     │ spawns
//!        ┌────────────────────────────┼──────────────────────────┐
//!        ▼                            ▼                          ▼
//!  student task #1 …           student task #N            arbiter task
//!  sleep(arrival)                                         Office::run_arbiter
//!  Office::enter ──┐                              ┌────── evaluate / break
//!  sleep(question) │                              │
//!  Office::leave ──┤                              │
//!                  ▼                              ▼
//!        ┌───────────────────────────────────────────────┐
//!        │ Office (shared state, one lock)               │
//!        │   occupancy[2] waiting[2] consec[2] invite[2] │
//!        │   services_since_break                        │
//!        │   door: [Semaphore; 2]   changed: Notify      │
//!        └───────────────────┬───────────────────────────┘
//!                            ▼
//!                    Bus (broadcast) ──► listener ──► SubscriberSet
//!                                                      └─► LogWriter
//! ```
//!
//! ### Admission rule
//! A waiter of class `C` is admitted iff a seat is free, no student of the
//! other class is seated, `C`'s consecutive-admission streak is below the
//! limit **or** the other class has no waiters, the professor is not due
//! for a break, and no invitation of either class is outstanding. The
//! streak clause bounds how long the non-favored class can wait; the
//! invite flag serializes the door handshake so at most one student is in
//! flight toward a seat at any time.
//!
//! ### Break rule
//! Every entry counts toward `services_since_break`. At the threshold, no
//! further admissions are granted; once the office drains empty the
//! professor sleeps for the fixed break duration, then the counter resets
//! and admission resumes.
//!
//! ## Features
//! | Area            | Description                                        | Key types                          |
//! |-----------------|----------------------------------------------------|------------------------------------|
//! | **Core**        | Fair two-class admission with breaks.              | [`Office`], [`Class`], [`Snapshot`]|
//! | **Workloads**   | Parse and validate student workload files.         | [`Workload`], [`StudentRecord`]    |
//! | **Simulation**  | Spawn, join, and tear down one full run.           | [`Simulation`]                     |
//! | **Events**      | Observe every decision on a broadcast bus.         | [`Event`], [`EventKind`], [`Bus`]  |
//! | **Subscribers** | Hook into the event stream (logging, counting).    | [`Subscribe`], [`LogWriter`]       |
//! | **Errors**      | Typed workload-loading failures.                   | [`WorkloadError`]                  |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use officevisor::{Config, LogWriter, Simulation, Subscribe, Workload};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let workload = Workload::from_path("students.txt")?;
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let sim = Simulation::with_subscribers(Config::default(), workload, subs);
//!     let completed = sim.run().await;
//!     println!("{completed} students were helped");
//!     Ok(())
//! }
//! ```

mod class;
mod config;
mod core;
mod error;
mod events;
mod office;
mod subscribers;
mod workload;

pub mod sim;

// ---- Public re-exports ----

pub use class::Class;
pub use config::Config;
pub use error::WorkloadError;
pub use events::{Bus, Event, EventKind};
pub use office::{Office, Snapshot};
pub use sim::Simulation;
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use workload::{StudentRecord, Workload, MAX_STUDENTS};
