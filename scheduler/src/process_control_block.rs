use crate::{ChannelHandle, Pid, Timestamp};

/// The scheduling state of one simulated process
///
/// A record is owned by exactly one container at a time: a ready queue,
/// the CPU slot, or nobody once it has completed and been dropped.
/// It is deliberately not `Clone`, moving it is the only way to transfer it.
#[derive(Debug, PartialEq, Eq)]
pub struct ProcessControlBlock {
    /// The pid of the process
    pid: Pid,
    /// Channel the completion message is delivered on
    channel: ChannelHandle,
    /// Total CPU time the process needs, fixed at admission
    required_time_ms: usize,
    /// CPU time consumed so far
    elapsed_time_ms: usize,
    /// When the current CPU occupancy began
    slice_start: Timestamp,
    /// Current MLFQ level
    ///
    /// Round Robin and SJF leave it at zero
    priority_level: usize,
}

impl ProcessControlBlock {
    /// Creates a new Process Control Block, with no CPU time consumed
    ///
    /// * `pid` - pid of the new process
    /// * `channel` - where the completion message has to be sent
    /// * `required_time_ms` - the CPU time the process needs to finish
    pub fn new(pid: Pid, channel: ChannelHandle, required_time_ms: usize) -> ProcessControlBlock {
        ProcessControlBlock {
            pid,
            channel,
            required_time_ms,
            elapsed_time_ms: 0,
            slice_start: Timestamp::new(0),
            priority_level: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn channel(&self) -> ChannelHandle {
        self.channel
    }

    pub fn required_time_ms(&self) -> usize {
        self.required_time_ms
    }

    pub fn elapsed_time_ms(&self) -> usize {
        self.elapsed_time_ms
    }

    pub fn remaining_time_ms(&self) -> usize {
        self.required_time_ms.saturating_sub(self.elapsed_time_ms)
    }

    pub fn slice_start(&self) -> Timestamp {
        self.slice_start
    }

    pub fn priority_level(&self) -> usize {
        self.priority_level
    }

    /// Charges `time` units of CPU time to the process
    pub(crate) fn execute(&mut self, time: usize) {
        self.elapsed_time_ms += time;
    }

    pub(crate) fn start_slice(&mut self, now: Timestamp) {
        self.slice_start = now;
    }

    pub(crate) fn set_priority_level(&mut self, level: usize) {
        self.priority_level = level;
    }

    /// The process consumed all the CPU time it asked for
    ///
    /// Elapsed time may overshoot the requirement by less than a tick.
    pub fn is_finished(&self) -> bool {
        self.elapsed_time_ms >= self.required_time_ms
    }

    /// The process held the CPU for at least `quantum` since its last dispatch
    pub fn slice_expired(&self, now: Timestamp, quantum: usize) -> bool {
        now.since(self.slice_start) >= quantum
    }
}
