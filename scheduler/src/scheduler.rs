use crate::{Collector, CompletionNotifier, CpuSlot, Pid, ReadyQueue, Timestamp};

/// A scheduling policy, driven once per tick
///
/// The driver owns the ready queue and the CPU slot and lends them to the
/// policy for the duration of one call. Policies with extra state (the MLFQ
/// levels) keep it in `self`, so every instance is independent.
pub trait Scheduler: Collector {
    /// Advances the policy by one tick
    ///
    /// * `now` - current simulated time; must grow by the configured tick between calls
    /// * `queue` - ready queue where the driver admits new processes
    /// * `cpu` - the CPU slot
    /// * `notifier` - receives one event for every process that finishes on this tick
    fn tick(
        &mut self,
        now: Timestamp,
        queue: &mut ReadyQueue,
        cpu: &mut CpuSlot,
        notifier: &mut dyn CompletionNotifier,
    );

    /// Policy name, for logs
    fn name(&self) -> &'static str;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn tick(
        &mut self,
        now: Timestamp,
        queue: &mut ReadyQueue,
        cpu: &mut CpuSlot,
        notifier: &mut dyn CompletionNotifier,
    ) {
        (**self).tick(now, queue, cpu, notifier)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: Scheduler + ?Sized> Collector for Box<S> {
    fn collect_queued(&self) -> Vec<Pid> {
        (**self).collect_queued()
    }
}
