//! Process arrivals fed to the simulation.
//!
//! A workload file has one process per line, `pid arrival_ms required_ms`,
//! blank lines and `#` comments ignored.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use scheduler::{Pid, Timestamp};

/// A process entering the system
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub pid: Pid,
    pub arrival: Timestamp,
    pub required_time_ms: usize,
}

impl Arrival {
    pub fn new(pid: usize, arrival_ms: usize, required_time_ms: usize) -> Arrival {
        Arrival {
            pid: Pid::new(pid),
            arrival: Timestamp::new(arrival_ms),
            required_time_ms,
        }
    }
}

#[derive(Debug)]
pub enum WorkloadError {
    Io(io::Error),
    /// A line that is not three unsigned integers
    Malformed { line: usize, content: String },
    /// The same pid appears twice
    DuplicatePid { line: usize, pid: Pid },
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Io(err) => write!(f, "cannot read workload: {}", err),
            WorkloadError::Malformed { line, content } => {
                write!(f, "line {}: expected 'pid arrival_ms required_ms', got '{}'", line, content)
            }
            WorkloadError::DuplicatePid { line, pid } => {
                write!(f, "line {}: pid {} already used", line, pid)
            }
        }
    }
}

impl std::error::Error for WorkloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkloadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkloadError {
    fn from(err: io::Error) -> Self {
        WorkloadError::Io(err)
    }
}

/// Parses a workload, returning the arrivals sorted by arrival time
///
/// Processes arriving at the same time keep their order in the text.
pub fn parse(text: &str) -> Result<Vec<Arrival>, WorkloadError> {
    let mut arrivals = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<usize> = line
            .split_whitespace()
            .map(|field| field.parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| WorkloadError::Malformed {
                line: index + 1,
                content: line.to_string(),
            })?;

        let arrival = match fields.as_slice() {
            [pid, arrival, required] => Arrival::new(*pid, *arrival, *required),
            _ => {
                return Err(WorkloadError::Malformed {
                    line: index + 1,
                    content: line.to_string(),
                })
            }
        };

        if !seen.insert(arrival.pid) {
            return Err(WorkloadError::DuplicatePid {
                line: index + 1,
                pid: arrival.pid,
            });
        }

        arrivals.push(arrival);
    }

    arrivals.sort_by_key(|arrival| arrival.arrival);
    Ok(arrivals)
}

pub fn load(path: &Path) -> Result<Vec<Arrival>, WorkloadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Workload used when no file is given
pub fn default_workload() -> Vec<Arrival> {
    vec![
        Arrival::new(1, 0, 1200),
        Arrival::new(2, 0, 300),
        Arrival::new(3, 200, 2000),
        Arrival::new(4, 400, 100),
        Arrival::new(5, 1000, 700),
    ]
}
