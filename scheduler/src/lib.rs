//! A scheduler library.
//!
//! This library provides the policies that decide, once per simulated tick,
//! which process occupies the single virtual CPU, and the process and queue
//! types they work on.
//!
//! The driver owns a [`ReadyQueue`] and a [`CpuSlot`], admits new processes
//! at the tail of the queue, and calls [`Scheduler::tick`] with the current
//! time, advancing it by a fixed step between calls. Finished processes are
//! reported to a [`CompletionNotifier`] and dropped.
//!

use std::num::NonZeroUsize;

mod schedulers;
pub use schedulers::{MlfqScheduler, RoundRobinScheduler, ShortestJobFirstScheduler};

mod scheduler;
pub use crate::scheduler::Scheduler;

mod common_types;
pub use crate::common_types::{ChannelHandle, Pid, Timestamp};
pub use crate::common_types::{DEFAULT_QUANTUM_MS, MLFQ_LEVELS, TICKS_MS};

mod collector;
pub use crate::collector::collect_all;
pub use crate::collector::Collector;

mod process_control_block;
pub use process_control_block::ProcessControlBlock;

mod ready_queue;
pub use ready_queue::ReadyQueue;

mod cpu;
pub use cpu::CpuSlot;

mod notifier;
pub use notifier::{
    ChannelNotifier, CompletionEvent, CompletionNotifier, EventLog, NotifyError, ProcessRequest,
};

mod config;
pub use config::{ConfigError, PolicyKind, SchedulerConfig};

mod common_funcs;

fn default_tick() -> NonZeroUsize {
    NonZeroUsize::new(TICKS_MS).unwrap_or(NonZeroUsize::MIN)
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
#[must_use]
pub fn round_robin(timeslice: NonZeroUsize) -> impl Scheduler {
    RoundRobinScheduler::new(timeslice, default_tick())
}

/// Returns a structure that implements the `Scheduler` trait with a multi-level feedback
/// queue policy
///
/// * `timeslice` - the time quanta of every level
/// * `levels` - number of priority levels; a process is never demoted below the last one
#[must_use]
pub fn mlfq(timeslice: NonZeroUsize, levels: NonZeroUsize) -> impl Scheduler {
    MlfqScheduler::new(levels, timeslice, default_tick())
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive
/// shortest job first policy
#[must_use]
pub fn shortest_job_first() -> impl Scheduler {
    ShortestJobFirstScheduler::new(default_tick())
}

/// Builds the scheduler described by `config`
pub fn build(config: &SchedulerConfig) -> Result<Box<dyn Scheduler>, ConfigError> {
    config.validate()?;

    let tick = NonZeroUsize::new(config.tick_ms).ok_or(ConfigError::ZeroTick)?;
    let scheduler: Box<dyn Scheduler> = match config.policy {
        PolicyKind::RoundRobin => {
            let quanta = NonZeroUsize::new(config.quantum_ms).ok_or(ConfigError::ZeroQuantum)?;
            Box::new(RoundRobinScheduler::new(quanta, tick))
        }
        PolicyKind::Mlfq => {
            let quanta = NonZeroUsize::new(config.quantum_ms).ok_or(ConfigError::ZeroQuantum)?;
            let levels = NonZeroUsize::new(config.levels).ok_or(ConfigError::ZeroLevels)?;
            Box::new(MlfqScheduler::new(levels, quanta, tick))
        }
        PolicyKind::ShortestJobFirst => Box::new(ShortestJobFirstScheduler::new(tick)),
    };

    log::info!("using {} scheduler ({:?})", scheduler.name(), config);
    Ok(scheduler)
}
