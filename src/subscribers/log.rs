//! # Simple logging subscriber for demos and debugging.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format,
//! reproducing the progress report of the classic simulation.
//!
//! ## Output format
//! ```text
//! [office-hours] the professor arrived
//! [waiting] class=A
//! [admitted] class=A
//! [entered] class=A
//! [questions] student=4 class=A for=2000ms
//! [break] for=5000ms
//! [break-over]
//! [done]
//! ```

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Stdout logging subscriber.
///
/// Intended for development and the bundled binary; implement a custom
/// [`Subscribe`] for structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ArbiterStarted => {
                println!("[office-hours] the professor arrived");
            }
            EventKind::AdmissionGranted => {
                if let Some(class) = e.class {
                    println!("[admitted] class={class}");
                }
            }
            EventKind::BreakStarted => {
                println!("[break] for={}ms", e.delay_ms.unwrap_or(0));
            }
            EventKind::BreakEnded => {
                println!("[break-over]");
            }
            EventKind::ArbiterStopped => {
                println!("[office-hours] the professor left");
            }
            EventKind::StudentWaiting => {
                if let Some(class) = e.class {
                    println!("[waiting] class={class}");
                }
            }
            EventKind::StudentEntered => {
                if let Some(class) = e.class {
                    println!("[entered] class={class}");
                }
            }
            EventKind::StudentDeparted => {
                if let Some(class) = e.class {
                    println!("[departed] class={class}");
                }
            }
            EventKind::StudentArrived => {
                if let (Some(id), Some(class)) = (e.student, e.class) {
                    println!("[arrived] student={id} class={class}");
                }
            }
            EventKind::QuestionsStarted => {
                if let (Some(id), Some(class)) = (e.student, e.class) {
                    println!(
                        "[questions] student={id} class={class} for={}ms",
                        e.delay_ms.unwrap_or(0)
                    );
                }
            }
            EventKind::QuestionsFinished => {
                if let (Some(id), Some(class)) = (e.student, e.class) {
                    println!("[finished] student={id} class={class}");
                }
            }
            EventKind::SimulationDone => {
                println!("[done]");
            }
        }
    }
}
