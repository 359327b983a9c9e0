use crate::{Pid, ProcessControlBlock, Timestamp};

/// The single virtual CPU, holding at most one running process
#[derive(Debug, Default)]
pub struct CpuSlot {
    running: Option<ProcessControlBlock>,
}

impl CpuSlot {
    pub fn new() -> CpuSlot {
        CpuSlot { running: None }
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn running(&self) -> Option<&ProcessControlBlock> {
        self.running.as_ref()
    }

    pub(crate) fn running_mut(&mut self) -> Option<&mut ProcessControlBlock> {
        self.running.as_mut()
    }

    pub fn running_pid(&self) -> Option<Pid> {
        self.running.as_ref().map(|pcb| pcb.pid())
    }

    /// Puts `pcb` on the CPU and starts its time slice at `now`
    ///
    /// The slot must be idle; a process already running would be lost.
    pub(crate) fn dispatch(&mut self, mut pcb: ProcessControlBlock, now: Timestamp) {
        debug_assert!(self.running.is_none(), "dispatch on a busy CPU");

        pcb.start_slice(now);
        log::debug!(
            "[{}] dispatch pid {} (level {}, {}/{} ms)",
            now,
            pcb.pid(),
            pcb.priority_level(),
            pcb.elapsed_time_ms(),
            pcb.required_time_ms()
        );
        self.running = Some(pcb);
    }

    /// Takes the running process off the CPU
    pub(crate) fn release(&mut self) -> Option<ProcessControlBlock> {
        self.running.take()
    }
}
