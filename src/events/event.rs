//! # Runtime events emitted by the arbiter, the gate, and the simulation.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Arbiter events**: admission decisions and break transitions
//! - **Gate events**: students crossing the office threshold
//! - **Simulation events**: per-student progress (arrival, questions, done)
//!
//! The [`Event`] struct carries optional metadata: the student class, the
//! student id, and a delay for break events.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Admission ordering in tests is recovered by filtering
//! [`EventKind::AdmissionGranted`] events and sorting by `seq`.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::class::Class;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Arbiter events ===
    /// The arbiter started evaluating (office hours opened).
    ///
    /// Sets: `at`, `seq`.
    ArbiterStarted,

    /// One waiter of `class` was granted admission (invite issued).
    ///
    /// Sets: `class`, `at`, `seq`.
    AdmissionGranted,

    /// The professor began a break (office empty, threshold reached).
    ///
    /// Sets: `delay_ms` (break length), `at`, `seq`.
    BreakStarted,

    /// The break elapsed; the service counter was reset.
    ///
    /// Sets: `at`, `seq`.
    BreakEnded,

    /// The arbiter was cancelled and stopped evaluating.
    ///
    /// Sets: `at`, `seq`.
    ArbiterStopped,

    // === Gate events ===
    /// A student registered as waiting outside the office.
    ///
    /// Sets: `class`, `at`, `seq`.
    StudentWaiting,

    /// A student consumed its invite and took a seat.
    ///
    /// Sets: `class`, `at`, `seq`.
    StudentEntered,

    /// A student gave up its seat and left.
    ///
    /// Sets: `class`, `at`, `seq`.
    StudentDeparted,

    // === Simulation events ===
    /// A student task woke up after its arrival delay.
    ///
    /// Sets: `class`, `student`, `at`, `seq`.
    StudentArrived,

    /// A seated student started asking questions.
    ///
    /// Sets: `class`, `student`, `delay_ms` (question time), `at`, `seq`.
    QuestionsStarted,

    /// A seated student finished its questions and prepares to leave.
    ///
    /// Sets: `class`, `student`, `at`, `seq`.
    QuestionsFinished,

    /// All student tasks completed and the arbiter was torn down.
    ///
    /// Sets: `at`, `seq`.
    SimulationDone,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Student class, if applicable.
    pub class: Option<Class>,
    /// Student id, if applicable.
    pub student: Option<u32>,
    /// Delay in milliseconds (break length or question time).
    pub delay_ms: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            class: None,
            student: None,
            delay_ms: None,
        }
    }

    /// Attaches a student class.
    #[inline]
    pub fn with_class(mut self, class: Class) -> Self {
        self.class = Some(class);
        self
    }

    /// Attaches a student id.
    #[inline]
    pub fn with_student(mut self, id: u32) -> Self {
        self.student = Some(id);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }
}
