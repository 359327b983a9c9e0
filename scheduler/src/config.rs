use std::fmt;
use std::str::FromStr;

use crate::{DEFAULT_QUANTUM_MS, MLFQ_LEVELS, TICKS_MS};

/// Which scheduling policy to run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    RoundRobin,
    Mlfq,
    ShortestJobFirst,
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rr" | "round-robin" | "round_robin" => Ok(PolicyKind::RoundRobin),
            "mlfq" => Ok(PolicyKind::Mlfq),
            "sjf" | "shortest-job-first" => Ok(PolicyKind::ShortestJobFirst),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::RoundRobin => write!(f, "rr"),
            PolicyKind::Mlfq => write!(f, "mlfq"),
            PolicyKind::ShortestJobFirst => write!(f, "sjf"),
        }
    }
}

/// Scheduler configuration, fixed for the lifetime of a scheduler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub policy: PolicyKind,
    /// Time quanta of the preemptive policies. SJF ignores it.
    pub quantum_ms: usize,
    /// CPU time charged to the running process per tick
    ///
    /// Must match the step the driver advances the clock by.
    pub tick_ms: usize,
    /// Number of MLFQ priority levels. Other policies ignore it.
    pub levels: usize,
}

impl SchedulerConfig {
    pub fn new(policy: PolicyKind) -> SchedulerConfig {
        SchedulerConfig {
            policy,
            ..SchedulerConfig::default()
        }
    }

    pub fn with_quantum(mut self, quantum_ms: usize) -> SchedulerConfig {
        self.quantum_ms = quantum_ms;
        self
    }

    pub fn with_tick(mut self, tick_ms: usize) -> SchedulerConfig {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_levels(mut self, levels: usize) -> SchedulerConfig {
        self.levels = levels;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        match self.policy {
            PolicyKind::RoundRobin if self.quantum_ms == 0 => Err(ConfigError::ZeroQuantum),
            PolicyKind::Mlfq if self.quantum_ms == 0 => Err(ConfigError::ZeroQuantum),
            PolicyKind::Mlfq if self.levels == 0 => Err(ConfigError::ZeroLevels),
            _ => Ok(()),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            policy: PolicyKind::RoundRobin,
            quantum_ms: DEFAULT_QUANTUM_MS,
            tick_ms: TICKS_MS,
            levels: MLFQ_LEVELS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A preemptive policy needs a quantum of at least 1 ms
    ZeroQuantum,
    /// The tick must advance time
    ZeroTick,
    /// MLFQ needs at least one level
    ZeroLevels,
    /// Policy name not recognized
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroQuantum => write!(f, "quantum must be greater than zero"),
            ConfigError::ZeroTick => write!(f, "tick must be greater than zero"),
            ConfigError::ZeroLevels => write!(f, "MLFQ needs at least one priority level"),
            ConfigError::UnknownPolicy(name) => {
                write!(f, "unknown policy '{}' (expected rr, mlfq or sjf)", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
