//! # Workload input: the ordered list of simulated students.
//!
//! A workload file is a sequence of whitespace-separated triples, one per
//! student:
//!
//! ```text
//! class arrival question
//! ```
//!
//! where `class` is `0` (A) or `1` (B), `arrival` is the delay in seconds
//! before the student shows up, and `question` is the time in seconds the
//! student spends with the professor. Blank lines are skipped. The file is
//! consumed once at startup into a fixed collection; records are never
//! mutated afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::class::Class;
use crate::error::WorkloadError;

/// Maximum number of students accepted in one workload.
pub const MAX_STUDENTS: usize = 1000;

/// Immutable description of one simulated student.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    /// Position in the workload (0-based), used in progress events.
    pub id: u32,
    /// Which class the student belongs to.
    pub class: Class,
    /// Delay before the student arrives at the office.
    pub arrival_delay: Duration,
    /// Time the student spends asking questions once seated.
    pub question_time: Duration,
}

/// An ordered, validated collection of [`StudentRecord`]s.
#[derive(Clone, Debug)]
pub struct Workload {
    records: Vec<StudentRecord>,
}

impl Workload {
    /// Builds a workload directly from records (tests, generated loads).
    ///
    /// Applies the same emptiness/size validation as file loading.
    pub fn from_records(records: Vec<StudentRecord>) -> Result<Self, WorkloadError> {
        if records.is_empty() {
            return Err(WorkloadError::Empty);
        }
        if records.len() > MAX_STUDENTS {
            return Err(WorkloadError::TooMany { max: MAX_STUDENTS });
        }
        Ok(Self { records })
    }

    /// Loads a workload file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a workload from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, WorkloadError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            records.push(parse_line(line, idx + 1, records.len() as u32)?);
            if records.len() > MAX_STUDENTS {
                return Err(WorkloadError::TooMany { max: MAX_STUDENTS });
            }
        }
        Self::from_records(records)
    }

    /// The records, in arrival-spawn order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Number of students in the workload.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the workload has no students (unreachable after validation).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_line(line: &str, lineno: usize, id: u32) -> Result<StudentRecord, WorkloadError> {
    let mut fields = line.split_whitespace();
    let mut next_u64 = |what: &str| -> Result<u64, WorkloadError> {
        let tok = fields.next().ok_or_else(|| WorkloadError::Parse {
            line: lineno,
            reason: format!("missing {what}"),
        })?;
        tok.parse::<u64>().map_err(|_| WorkloadError::Parse {
            line: lineno,
            reason: format!("invalid {what} {tok:?}"),
        })
    };

    let code = next_u64("class")?;
    let arrival = next_u64("arrival time")?;
    let question = next_u64("question time")?;
    if fields.next().is_some() {
        return Err(WorkloadError::Parse {
            line: lineno,
            reason: "trailing fields".to_string(),
        });
    }

    let class = u32::try_from(code)
        .ok()
        .and_then(Class::from_code)
        .ok_or_else(|| WorkloadError::Parse {
            line: lineno,
            reason: format!("unknown class code {code}"),
        })?;

    Ok(StudentRecord {
        id,
        class,
        arrival_delay: Duration::from_secs(arrival),
        question_time: Duration::from_secs(question),
    })
}
