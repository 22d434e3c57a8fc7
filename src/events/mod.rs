//! Event system: classification, metadata, and broadcast delivery.
//!
//! - [`event`]: [`EventKind`] and the [`Event`] struct with builders;
//! - [`bus`]: [`Bus`], a thin broadcast-channel wrapper.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
