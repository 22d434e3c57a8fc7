//! # Student class identity.
//!
//! The office serves two competing classes of students. Almost every rule in
//! the admission core is symmetric in the two classes, so the whole core is
//! written once, parameterized by a [`Class`] and its [`Class::other`].
//!
//! ## Invariants
//! - Students of different classes never occupy the office simultaneously.
//! - Per-class counters (waiting, occupancy, streak, invite) are stored in
//!   two-element arrays indexed by [`Class::index`].

use std::fmt;

/// Identity of a student class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Class {
    /// Class A (encoded as `0` in workload files).
    A,
    /// Class B (encoded as `1` in workload files).
    B,
}

impl Class {
    /// Returns the competing class.
    #[inline]
    pub fn other(self) -> Class {
        match self {
            Class::A => Class::B,
            Class::B => Class::A,
        }
    }

    /// Stable index for per-class counter arrays (`A = 0`, `B = 1`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Class::A => 0,
            Class::B => 1,
        }
    }

    /// Both classes, in evaluation order (A first, matching the arbiter).
    pub const ALL: [Class; 2] = [Class::A, Class::B];

    /// Decodes the workload-file encoding (`0` = A, `1` = B).
    pub fn from_code(code: u32) -> Option<Class> {
        match code {
            0 => Some(Class::A),
            1 => Some(Class::B),
            _ => None,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::A => f.write_str("A"),
            Class::B => f.write_str("B"),
        }
    }
}
