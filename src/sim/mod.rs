//! # Simulation: the orchestration around the admission core.
//!
//! [`Simulation`] is the external collaborator the core is written for. It
//! owns an [`Office`], spawns exactly one arbiter task plus one task per
//! [`StudentRecord`], joins all student tasks, and then tears the arbiter
//! down. Everything stateful happens inside the office; the simulation only
//! sleeps, calls `enter`/`leave`, and publishes per-student progress events.
//!
//! ## Architecture
//! ```text
//! Workload ──► Simulation::run()
//!                ├─► spawn listener (Bus ──► SubscriberSet::emit)
//!                ├─► spawn Office::run_arbiter(child token)
//!                ├─► JoinSet: one task per student
//!                │     sleep(arrival) → enter → sleep(question) → leave
//!                ├─► join all students
//!                └─► cancel arbiter, publish SimulationDone, stop listener
//! ```
//!
//! ## Rules
//! - The arbiter token is cancelled only after every student task finished,
//!   so no in-progress admission is ever lost.
//! - An externally cancelled run (OS signal via [`Simulation::run_with_token`])
//!   aborts student tasks at their next suspension point; the run still
//!   tears down in order.

pub mod shutdown;

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::{Event, EventKind};
use crate::office::Office;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::workload::{StudentRecord, Workload};

/// Drives one office-hours run over a fixed workload.
pub struct Simulation {
    office: Office,
    workload: Workload,
    subs: Arc<SubscriberSet>,
}

impl Simulation {
    /// Creates a simulation with no subscribers attached.
    pub fn new(cfg: Config, workload: Workload) -> Self {
        Self::with_subscribers(cfg, workload, Vec::new())
    }

    /// Creates a simulation that fans bus events out to `subscribers`.
    pub fn with_subscribers(
        cfg: Config,
        workload: Workload,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        Self {
            office: Office::new(cfg),
            workload,
            subs: Arc::new(SubscriberSet::new(subscribers)),
        }
    }

    /// The office this simulation runs against.
    pub fn office(&self) -> &Office {
        &self.office
    }

    /// Runs the whole workload to completion.
    ///
    /// Returns the number of students that completed their visit.
    pub async fn run(&self) -> usize {
        self.run_with_token(CancellationToken::new()).await
    }

    /// Runs the workload, aborting early if `token` is cancelled (e.g. by
    /// an OS signal). Teardown order is unchanged on abort: students first,
    /// then the arbiter.
    pub async fn run_with_token(&self, token: CancellationToken) -> usize {
        let listener = self.spawn_listener();

        let arbiter_token = token.child_token();
        let arbiter = tokio::spawn({
            let office = self.office.clone();
            let token = arbiter_token.clone();
            async move { office.run_arbiter(token).await }
        });

        let mut students = JoinSet::new();
        for rec in self.workload.records() {
            students.spawn(student_task(self.office.clone(), *rec, token.clone()));
        }

        let mut completed = 0usize;
        while let Some(res) = students.join_next().await {
            if matches!(res, Ok(true)) {
                completed += 1;
            }
        }

        arbiter_token.cancel();
        let _ = arbiter.await;
        self.office.bus().publish(Event::now(EventKind::SimulationDone));

        if let Some((listener_token, handle)) = listener {
            listener_token.cancel();
            let _ = handle.await;
        }
        completed
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    ///
    /// The listener has its own token so it can drain and deliver the final
    /// events after the run token is cancelled.
    fn spawn_listener(&self) -> Option<(CancellationToken, tokio::task::JoinHandle<()>)> {
        if self.subs.is_empty() {
            return None;
        }
        let mut rx = self.office.bus().subscribe();
        let subs = Arc::clone(&self.subs);
        let token = CancellationToken::new();
        let listener_token = token.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => subs.emit(&ev),
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    },
                    _ = token.cancelled() => {
                        // Deliver whatever is still queued before stopping.
                        while let Ok(ev) = rx.try_recv() {
                            subs.emit(&ev);
                        }
                        break;
                    }
                }
            }
        });
        Some((listener_token, handle))
    }
}

/// One student's life: arrive late, wait to be admitted, ask questions,
/// leave. Returns true if the visit completed, false if the run was
/// cancelled first.
async fn student_task(office: Office, rec: StudentRecord, token: CancellationToken) -> bool {
    let bus = office.bus().clone();
    let visit = async move {
        time::sleep(rec.arrival_delay).await;
        bus.publish(
            Event::now(EventKind::StudentArrived)
                .with_student(rec.id)
                .with_class(rec.class),
        );

        office.enter(rec.class).await;

        bus.publish(
            Event::now(EventKind::QuestionsStarted)
                .with_student(rec.id)
                .with_class(rec.class)
                .with_delay(rec.question_time),
        );
        time::sleep(rec.question_time).await;
        bus.publish(
            Event::now(EventKind::QuestionsFinished)
                .with_student(rec.id)
                .with_class(rec.class),
        );

        office.leave(rec.class);
    };

    tokio::select! {
        _ = token.cancelled() => false,
        _ = visit => true,
    }
}
