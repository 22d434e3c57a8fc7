//! # Admission policy: who gets the next invite.
//!
//! Pure decision functions over a snapshot of [`OfficeState`]; no locking,
//! no side effects. The arbiter evaluates them under the lock and applies
//! the chosen mutation in the same critical section.
//!
//! ## The rule
//! A waiter of class `C` (with competing class `D`) may be admitted iff all
//! of:
//! - a seat is free,
//! - no `D` student is seated (classes never mix),
//! - `C`'s streak is below the limit **or** `D` has no waiters — the
//!   starvation-prevention clause: a class may run uninterrupted only while
//!   nobody else is waiting,
//! - `C` has at least one waiter,
//! - the professor is not due for (or on) a break,
//! - no invite of either class is outstanding.
//!
//! At most one admission per evaluation pass; the granted invite blocks
//! both checks until the student completes its entry handshake. This
//! deliberately caps the rate at which students cross the threshold to one
//! at a time, even with spare seats; the bound is what makes the fairness
//! argument hold.

use crate::class::Class;
use crate::config::Config;

use super::state::OfficeState;

/// True when the professor must take a break: the cumulative service count
/// hit the threshold and the office has drained empty.
#[inline]
pub(crate) fn break_due(s: &OfficeState, cfg: &Config) -> bool {
    s.services_since_break == cfg.break_threshold && s.occupancy_total() == 0
}

/// The six-clause admission check for one class.
pub(crate) fn may_admit(s: &OfficeState, cfg: &Config, class: Class) -> bool {
    let other = class.other();
    s.occupancy_total() < cfg.seats_clamped()
        && s.occupancy[other.index()] == 0
        && (s.consec[class.index()] < cfg.streak_limit || s.waiting[other.index()] == 0)
        && s.waiting[class.index()] > 0
        && s.services_since_break != cfg.break_threshold
        && !s.invite_outstanding()
}

/// Picks the class to admit on this evaluation pass, if any.
///
/// Classes are checked in fixed order (A before B); cross-class ordering is
/// not FIFO, only starvation-bounded.
pub(crate) fn decide(s: &OfficeState, cfg: &Config) -> Option<Class> {
    Class::ALL.into_iter().find(|&c| may_admit(s, cfg, c))
}
