use crate::{CpuSlot, Pid, ReadyQueue};

/// Introspection over where each process currently sits
pub trait Collector {
    // Returns the pids held in the policy's own queues, in dispatch order
    fn collect_queued(&self) -> Vec<Pid>;
}

/// Lists every live pid: the running one first, then the driver's ready
/// queue, then the policy's own queues
///
/// A pid appearing twice means a process is in two places at once.
pub fn collect_all(scheduler: &dyn Collector, queue: &ReadyQueue, cpu: &CpuSlot) -> Vec<Pid> {
    let mut pids: Vec<Pid> = Vec::new();

    if let Some(pid) = cpu.running_pid() {
        pids.push(pid);
    }

    pids.extend(queue.pids());
    pids.extend(scheduler.collect_queued());

    pids
}
