//! Error types for workload loading.
//!
//! The admission core itself has no recoverable-error taxonomy: it runs over
//! trusted in-process data, and a violated invariant (capacity exceeded,
//! mixed classes, negative counts) means the policy or the state accounting
//! is wrong. Those are `assert!` failures that abort the run, never `Err`
//! values. The only fallible surface is reading the workload file, which
//! belongs to the orchestration layer.

use thiserror::Error;

/// Errors produced while loading a workload file.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// The file could not be opened or read.
    #[error("cannot read workload: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not parse as `class arrival question`.
    #[error("workload line {line}: {reason}")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The workload contained no student records.
    #[error("workload is empty")]
    Empty,

    /// The workload exceeded the maximum student count.
    #[error("workload has more than {max} students")]
    TooMany {
        /// The configured cap.
        max: usize,
    },
}

impl WorkloadError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use officevisor::WorkloadError;
    ///
    /// let err = WorkloadError::Empty;
    /// assert_eq!(err.as_label(), "workload_empty");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkloadError::Io(_) => "workload_io",
            WorkloadError::Parse { .. } => "workload_parse",
            WorkloadError::Empty => "workload_empty",
            WorkloadError::TooMany { .. } => "workload_too_many",
        }
    }
}
