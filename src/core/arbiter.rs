//! # Arbiter: the professor's decision loop.
//!
//! A single continuously-running task that owns every admission decision.
//! States: `Evaluating` ⇄ `OnBreak`. In `Evaluating` it drains decisions to
//! quiescence, then parks on the shared [`Notify`] until any event that
//! could change a decision (enqueue, entry, departure) wakes it. `OnBreak`
//! is entered only when the break precondition holds and always lasts the
//! full configured duration.
//!
//! ## Loop shape
//! ```text
//! loop {
//!   changed = shared.changed.notified()   // register BEFORE evaluating
//!   loop {                                // drain to quiescence
//!     lock state:
//!       break due?        ──► unlock, sleep(break_duration), reset counter
//!       policy picks C?   ──► apply grant under the lock
//!       neither           ──► unlock, stop draining
//!     if granted: door[C] += 1 permit, publish AdmissionGranted
//!   }
//!   select { token.cancelled() => exit, changed => re-evaluate }
//! }
//! ```
//!
//! ## Rules
//! - The lock is never held across a suspension point; cancellation can
//!   therefore never fire lock-held and strand waiters.
//! - Registering the `notified()` future before draining (plus the stored
//!   `notify_one` permit) closes the lost-wakeup window: a mutation landing
//!   mid-drain is observed either by the drain itself or by the next wait.
//! - Cancellation is abrupt: it may discard an in-flight evaluation or cut
//!   a break short, which is safe because teardown happens only after all
//!   students completed.

use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::class::Class;
use crate::events::{Event, EventKind};

use super::policy;
use super::state::Shared;

/// Outcome of one locked evaluation pass.
enum Step {
    /// An invite was issued for this class; signal one waiter.
    Admit(Class),
    /// The break precondition holds; go off duty for the fixed duration.
    Break,
    /// Nothing to do until the state changes.
    Idle,
}

/// The professor's arbiter loop over a [`Shared`] office.
pub(crate) struct Arbiter {
    shared: Arc<Shared>,
}

impl Arbiter {
    pub fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Runs until `token` is cancelled. Never returns on its own.
    pub async fn run(self, token: CancellationToken) {
        self.shared.bus.publish(Event::now(EventKind::ArbiterStarted));

        loop {
            let changed = self.shared.changed.notified();
            if self.drain(&token).await.is_err() {
                break;
            }
            tokio::select! {
                _ = token.cancelled() => break,
                _ = changed => {}
            }
        }

        self.shared.bus.publish(Event::now(EventKind::ArbiterStopped));
    }

    /// Applies decisions until the state is quiescent.
    ///
    /// Returns `Err(())` if cancellation interrupted a break.
    async fn drain(&self, token: &CancellationToken) -> Result<(), ()> {
        loop {
            let step = self.evaluate_once();
            match step {
                Step::Admit(class) => {
                    self.shared.door[class.index()].add_permits(1);
                    self.shared
                        .bus
                        .publish(Event::now(EventKind::AdmissionGranted).with_class(class));
                }
                Step::Break => self.take_break(token).await?,
                Step::Idle => return Ok(()),
            }
        }
    }

    /// One evaluation pass under the lock; grants are applied in the same
    /// critical section that decided them.
    fn evaluate_once(&self) -> Step {
        let cfg = &self.shared.cfg;
        self.shared.with_state(|s| {
            if policy::break_due(s, cfg) {
                return Step::Break;
            }
            match policy::decide(s, cfg) {
                Some(class) => {
                    s.grant(class);
                    s.assert_invariants(cfg);
                    Step::Admit(class)
                }
                None => Step::Idle,
            }
        })
    }

    /// The mandatory break: fixed duration, lock not held, nothing can
    /// shorten it except teardown cancellation.
    ///
    /// Between deciding the break and sleeping no admission can occur: the
    /// service counter sits at the threshold (blocking grants) and no
    /// invite was outstanding when the counter got there, so the office
    /// stays empty for the whole break.
    async fn take_break(&self, token: &CancellationToken) -> Result<(), ()> {
        let dur = self.shared.cfg.break_duration;
        self.shared
            .bus
            .publish(Event::now(EventKind::BreakStarted).with_delay(dur));

        tokio::select! {
            _ = token.cancelled() => return Err(()),
            _ = time::sleep(dur) => {}
        }

        self.shared.mutate(|s| s.end_break());
        self.shared.bus.publish(Event::now(EventKind::BreakEnded));
        Ok(())
    }
}
