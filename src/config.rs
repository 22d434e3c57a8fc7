//! # Global simulation configuration.
//!
//! Provides [`Config`], the centralized settings for the office and its
//! arbiter. The defaults reproduce the classic parameters of the exercise:
//! three seats, a streak limit of five, a break after every ten students,
//! and a five-second break.
//!
//! ## Field semantics
//! - `seats`: maximum simultaneous occupants of the office
//! - `streak_limit`: maximum consecutive admissions of one class while the
//!   other class has waiters
//! - `break_threshold`: cumulative entries after which the professor must
//!   take a break (the break starts only once the office is empty)
//! - `break_duration`: fixed length of a break; no event shortens it
//! - `bus_capacity`: event bus ring buffer size (min 1; clamped by `Bus`)
//!
//! ## Notes
//! All fields are public for flexibility. Prefer the helper accessors over
//! sprinkling clamping logic across the codebase.

use std::time::Duration;

/// Configuration for an [`Office`](crate::Office) and its arbiter.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of seats in the office.
    ///
    /// `occupancy_total` never exceeds this bound; it is asserted after
    /// every entry.
    pub seats: u32,

    /// Maximum consecutive admissions of one class while the other class
    /// has at least one waiter.
    ///
    /// This is the starvation bound: once a class has been admitted
    /// `streak_limit` times in a row and the other class is waiting, the
    /// next admission goes to the other class.
    pub streak_limit: u32,

    /// Number of students the professor helps before needing a break.
    ///
    /// Once `services_since_break` reaches this value no further admissions
    /// are granted; the break itself begins when the office drains empty.
    pub break_threshold: u32,

    /// Length of the professor's break.
    ///
    /// The break always runs to completion; admission resumes (and the
    /// service counter resets to zero) only after it elapses.
    pub break_duration: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// observe `Lagged` and skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns `seats` clamped to a minimum of 1.
    ///
    /// A zero-seat office would block every waiter forever; the core treats
    /// it as a one-seat office instead.
    #[inline]
    pub fn seats_clamped(&self) -> u32 {
        self.seats.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `seats = 3`
    /// - `streak_limit = 5`
    /// - `break_threshold = 10`
    /// - `break_duration = 5s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            seats: 3,
            streak_limit: 5,
            break_threshold: 10,
            break_duration: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.seats, 3);
        assert_eq!(cfg.streak_limit, 5);
        assert_eq!(cfg.break_threshold, 10);
        assert_eq!(cfg.break_duration, Duration::from_secs(5));
    }

    #[test]
    fn test_clamps() {
        let cfg = Config {
            seats: 0,
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.seats_clamped(), 1);
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
