//! Admission core: shared state, policy, arbiter, and the client gate.
//!
//! The only public surface of this module tree is re-exported through
//! [`Office`](crate::Office). Internal modules:
//! - [`state`]: the counters behind the single global lock, plus the
//!   wakeup notifier and per-class door semaphores;
//! - [`policy`]: pure admission/break decision functions;
//! - [`arbiter`]: the professor's evaluate-or-break loop;
//! - [`gate`]: the per-student enter/leave protocol.

pub(crate) mod arbiter;
pub(crate) mod gate;
pub(crate) mod policy;
pub(crate) mod state;
