//! # Shared office state and its single lock.
//!
//! All counters that admission decisions read and write live in one
//! [`OfficeState`] value behind one mutex, so every read-modify-write over
//! occupancy, queues, streaks, and invites is a single atomic unit. No
//! thread ever observes a partially updated combination (e.g. occupancy
//! bumped but the invite flag not yet cleared).
//!
//! ## Architecture
//! ```text
//!                      ┌────────────────────────────┐
//!   Arbiter ──────────►│  Shared                    │◄────────── Gate
//!   (grant, break)     │   state: Mutex<OfficeState>│   (enqueue, enter,
//!                      │   changed: Notify          │    depart)
//!                      │   door: [Semaphore; 2]     │
//!                      │   bus: Bus                 │
//!                      └────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The mutex is a `std` mutex held only for short critical sections and
//!   **never across an `.await`**; blocking waits happen on the `door`
//!   semaphores and the `changed` notifier, with no lock held.
//! - Every mutation re-checks the invariants and then pokes `changed`, so
//!   the arbiter re-evaluates after any event that could unblock a waiter.
//! - Invariant violations are programming-logic failures: they abort the
//!   run via `assert!` rather than surfacing as recoverable errors.

use std::sync::Mutex;

use tokio::sync::{Notify, Semaphore};

use crate::class::Class;
use crate::config::Config;
use crate::events::Bus;

/// All mutable counters of the office, guarded by one lock.
#[derive(Debug, Default)]
pub(crate) struct OfficeState {
    /// Students currently seated, per class.
    pub occupancy: [u32; 2],
    /// Students blocked awaiting admission, per class.
    pub waiting: [u32; 2],
    /// Consecutive admissions of the current streak holder, per class.
    ///
    /// At most one entry is non-zero; both are zero at start and after a
    /// break resets the streaks' context.
    pub consec: [u32; 2],
    /// Set while one signaled student of that class has not yet completed
    /// its entry handshake. At most one flag is set crate-wide.
    pub invite: [bool; 2],
    /// Students helped since the professor's last break.
    pub services_since_break: u32,
}

impl OfficeState {
    /// Total students currently seated.
    #[inline]
    pub fn occupancy_total(&self) -> u32 {
        self.occupancy[0] + self.occupancy[1]
    }

    /// True if any invite is outstanding (of either class).
    #[inline]
    pub fn invite_outstanding(&self) -> bool {
        self.invite[0] || self.invite[1]
    }

    /// Registers one more waiter of `class`.
    pub fn enqueue(&mut self, class: Class) {
        self.waiting[class.index()] += 1;
    }

    /// Applies an admission decision for `class`.
    ///
    /// Takes one waiter out of the queue, marks the invite outstanding, and
    /// moves the streak to `class` (cutting the other class's streak). The
    /// caller must have validated the decision against the policy first.
    pub fn grant(&mut self, class: Class) {
        assert!(
            self.waiting[class.index()] > 0,
            "granted admission to class {class} with no waiters"
        );
        assert!(
            !self.invite_outstanding(),
            "granted admission with an invite already outstanding"
        );
        self.waiting[class.index()] -= 1;
        self.invite[class.index()] = true;
        self.consec[class.other().index()] = 0;
        self.consec[class.index()] += 1;
    }

    /// Entry handshake of an admitted student of `class`.
    ///
    /// Consumes the outstanding invite, takes a seat, and counts the service
    /// toward the professor's break threshold.
    pub fn complete_entry(&mut self, class: Class) {
        assert!(
            self.invite[class.index()],
            "class {class} entered without an outstanding invite"
        );
        self.services_since_break += 1;
        self.occupancy[class.index()] += 1;
        self.invite[class.index()] = false;
    }

    /// Departure of a seated student of `class`.
    pub fn depart(&mut self, class: Class) {
        assert!(
            self.occupancy[class.index()] > 0,
            "class {class} departed from an empty office"
        );
        self.occupancy[class.index()] -= 1;
    }

    /// Ends a break: the office must have stayed empty and quiescent.
    pub fn end_break(&mut self) {
        assert!(self.occupancy_total() == 0, "break ended with students seated");
        assert!(!self.invite_outstanding(), "break ended with an invite outstanding");
        self.services_since_break = 0;
        self.consec = [0, 0];
    }

    /// Checks the reachable-state invariants; panics on violation.
    pub fn assert_invariants(&self, cfg: &Config) {
        assert!(
            self.occupancy_total() <= cfg.seats_clamped(),
            "occupancy {} exceeds {} seats",
            self.occupancy_total(),
            cfg.seats_clamped()
        );
        assert!(
            self.occupancy[0] == 0 || self.occupancy[1] == 0,
            "classes mixed in the office: {:?}",
            self.occupancy
        );
        assert!(
            !(self.invite[0] && self.invite[1]),
            "both invites outstanding at once"
        );
        assert!(
            self.services_since_break <= cfg.break_threshold,
            "services since break {} exceeds threshold {}",
            self.services_since_break,
            cfg.break_threshold
        );
    }
}

/// The office's shared handle: state, wakeup, per-class doors, and the bus.
///
/// Passed (via `Arc`) to both the arbiter and the client gate; there are no
/// free-standing globals.
pub(crate) struct Shared {
    pub cfg: Config,
    pub bus: Bus,
    state: Mutex<OfficeState>,
    /// Poked after every state mutation; the arbiter waits on it.
    pub changed: Notify,
    /// Per-class admission signals. Permits are added by the arbiter, one
    /// per admission, and consumed by waiters in FIFO order; a permit issued
    /// before the waiter blocks is still honored.
    pub door: [Semaphore; 2],
}

impl Shared {
    pub fn new(cfg: Config, bus: Bus) -> Self {
        Self {
            cfg,
            bus,
            state: Mutex::new(OfficeState::default()),
            changed: Notify::new(),
            door: [Semaphore::new(0), Semaphore::new(0)],
        }
    }

    /// Runs `f` under the state lock without invariant re-checks or wakeup.
    ///
    /// For read-only access (snapshots, decisions that may not mutate).
    pub fn with_state<R>(&self, f: impl FnOnce(&mut OfficeState) -> R) -> R {
        let mut state = self.state.lock().expect("office state lock poisoned");
        f(&mut state)
    }

    /// Runs `f` under the state lock, re-checks the invariants, and wakes
    /// the arbiter.
    ///
    /// Every state-changing event in the system goes through here, which is
    /// what lets the arbiter block instead of busy-polling.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut OfficeState) -> R) -> R {
        let out = {
            let mut state = self.state.lock().expect("office state lock poisoned");
            let out = f(&mut state);
            state.assert_invariants(&self.cfg);
            out
        };
        self.changed.notify_one();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> OfficeState {
        OfficeState::default()
    }

    #[test]
    fn test_enter_leave_accounting() {
        let cfg = Config::default();
        let mut s = state();
        s.enqueue(Class::A);
        s.grant(Class::A);
        assert_eq!(s.waiting[0], 0);
        assert!(s.invite[0]);
        assert_eq!(s.consec, [1, 0]);

        s.complete_entry(Class::A);
        assert_eq!(s.occupancy, [1, 0]);
        assert_eq!(s.services_since_break, 1);
        assert!(!s.invite_outstanding());
        s.assert_invariants(&cfg);

        s.depart(Class::A);
        assert_eq!(s.occupancy_total(), 0);
        s.assert_invariants(&cfg);
    }

    #[test]
    fn test_grant_cuts_other_streak() {
        let mut s = state();
        s.consec = [3, 0];
        s.enqueue(Class::B);
        s.grant(Class::B);
        assert_eq!(s.consec, [0, 1]);
    }

    #[test]
    fn test_end_break_resets_counters() {
        let mut s = state();
        s.services_since_break = 10;
        s.consec = [0, 4];
        s.end_break();
        assert_eq!(s.services_since_break, 0);
        assert_eq!(s.consec, [0, 0]);
    }

    #[test]
    #[should_panic(expected = "no waiters")]
    fn test_grant_without_waiters_panics() {
        state().grant(Class::A);
    }

    #[test]
    #[should_panic(expected = "without an outstanding invite")]
    fn test_entry_without_invite_panics() {
        state().complete_entry(Class::B);
    }

    #[test]
    #[should_panic(expected = "classes mixed")]
    fn test_mixed_classes_violate_invariants() {
        let mut s = state();
        s.occupancy = [1, 1];
        s.assert_invariants(&Config::default());
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_capacity_violation_panics() {
        let mut s = state();
        s.occupancy = [4, 0];
        s.assert_invariants(&Config::default());
    }
}
